//! Page animator
//!
//! Two small behaviours for long scrolling pages:
//!
//! - [`RevealObserver`]: a section becomes "visible" the first time at least
//!   [`REVEAL_THRESHOLD`] of it is inside the viewport, and is then no longer
//!   observed. It never hides again.
//! - [`SmoothScroll`]: jumping to an in-page anchor eases the scroll offset
//!   towards the target over [`DEFAULT_SCROLL_DURATION`] instead of snapping.
//!
//! Geometry is measured in terminal rows.

mod page;

pub use page::{AboutPage, AboutSection, PageLine};

use std::collections::HashSet;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Fraction of a section that must be visible before it is revealed
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Length of an anchor scroll animation
pub const DEFAULT_SCROLL_DURATION: Duration = Duration::from_millis(400);

/// Visible window over the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub offset: u16,
    pub height: u16,
}

/// Vertical extent of a section on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub top: u16,
    pub height: u16,
}

impl SectionSpan {
    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }

    /// Share of this section inside `viewport`, in `0.0..=1.0`
    pub fn visible_fraction(&self, viewport: Viewport) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        let view_bottom = viewport.offset.saturating_add(viewport.height);
        let top = self.top.max(viewport.offset);
        let bottom = self.bottom().min(view_bottom);
        if bottom <= top {
            return 0.0;
        }
        f64::from(bottom - top) / f64::from(self.height)
    }
}

/// One-shot visibility tracker.
#[derive(Debug, Clone)]
pub struct RevealObserver<K> {
    threshold: f64,
    observed: HashSet<K>,
    revealed: HashSet<K>,
}

impl<K: Copy + Eq + Hash> Default for RevealObserver<K> {
    fn default() -> Self {
        Self::new(REVEAL_THRESHOLD)
    }
}

impl<K: Copy + Eq + Hash> RevealObserver<K> {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            observed: HashSet::new(),
            revealed: HashSet::new(),
        }
    }

    /// Start watching `key`. Already revealed keys stay revealed and are not
    /// watched again.
    pub fn observe(&mut self, key: K) {
        if !self.revealed.contains(&key) {
            self.observed.insert(key);
        }
    }

    pub fn is_observing(&self, key: K) -> bool {
        self.observed.contains(&key)
    }

    pub fn is_revealed(&self, key: K) -> bool {
        self.revealed.contains(&key)
    }

    /// Check every observed section against `viewport`; returns the keys
    /// revealed by this call.
    pub fn update(&mut self, viewport: Viewport, spans: &[(K, SectionSpan)]) -> Vec<K> {
        let mut newly_revealed = Vec::new();
        for &(key, span) in spans {
            if !self.observed.contains(&key) {
                continue;
            }
            if span.visible_fraction(viewport) >= self.threshold {
                self.observed.remove(&key);
                self.revealed.insert(key);
                newly_revealed.push(key);
            }
        }
        newly_revealed
    }
}

/// An in-flight scroll from one offset to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScrollAnimation {
    from: u16,
    to: u16,
    started: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    fn offset_at(&self, now: Instant) -> u16 {
        let elapsed = now.saturating_duration_since(self.started);
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = ease_in_out(t);
        let from = f64::from(self.from);
        let to = f64::from(self.to);
        (from + (to - from) * eased).round() as u16
    }

    fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

/// Cubic ease-in-out over `t` in `0.0..=1.0`
fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Scroll position with optional animated anchor navigation.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    offset: u16,
    duration: Duration,
    animation: Option<ScrollAnimation>,
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_DURATION)
    }
}

impl SmoothScroll {
    pub fn new(duration: Duration) -> Self {
        Self {
            offset: 0,
            duration,
            animation: None,
        }
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Where the current animation ends, if one is running
    pub fn target(&self) -> Option<u16> {
        self.animation.map(|a| a.to)
    }

    /// Animate towards `target`, clamped to `max_offset`.
    pub fn scroll_to(&mut self, target: u16, max_offset: u16, now: Instant) {
        let to = target.min(max_offset);
        if to == self.offset {
            self.animation = None;
            return;
        }
        self.animation = Some(ScrollAnimation {
            from: self.offset,
            to,
            started: now,
            duration: self.duration,
        });
    }

    /// Move immediately, cancelling any animation
    pub fn jump_to(&mut self, offset: u16, max_offset: u16) {
        self.animation = None;
        self.offset = offset.min(max_offset);
    }

    /// Scroll by `delta` rows immediately
    pub fn scroll_by(&mut self, delta: i32, max_offset: u16) {
        let next = (i32::from(self.offset) + delta).clamp(0, i32::from(max_offset));
        self.jump_to(next as u16, max_offset);
    }

    /// Advance the animation to `now` and return the resulting offset.
    pub fn tick(&mut self, now: Instant) -> u16 {
        if let Some(animation) = self.animation {
            self.offset = animation.offset_at(now);
            if animation.is_finished(now) {
                self.animation = None;
            }
        }
        self.offset
    }
}
