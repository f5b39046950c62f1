//! The About page: static marketing copy with lazily revealed sections and
//! a table of contents whose anchors scroll smoothly.

use super::{RevealObserver, SectionSpan, SmoothScroll, Viewport};
use std::time::Instant;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Page sections, addressable by anchor (`#features`, `#how-it-works`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum AboutSection {
    Features,
    HowItWorks,
    Pricing,
    Contact,
}

impl AboutSection {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Features => "Features",
            Self::HowItWorks => "How it works",
            Self::Pricing => "Pricing",
            Self::Contact => "Contact",
        }
    }

    /// Anchor link target, e.g. `#how-it-works`
    pub fn anchor(&self) -> String {
        format!("#{self}")
    }

    /// Resolve an in-page link. Only `#`-prefixed hrefs are anchors.
    pub fn from_href(href: &str) -> Option<Self> {
        href.strip_prefix('#')?.parse().ok()
    }

    fn body(&self) -> &'static [&'static str] {
        match self {
            Self::Features => &[
                "Live occupancy map of every spot in the lot.",
                "Capacity, occupied, available and occupancy rate at a glance.",
                "Per-spot details: plate number and time parked.",
                "Runs entirely offline; data stays on this machine.",
            ],
            Self::HowItWorks => &[
                "Sensors report each car entering or leaving a spot.",
                "SmartPark keeps the lot state in a local store.",
                "The dashboard refreshes every few seconds on its own.",
                "Press 'o' or 'r' on the dashboard to simulate traffic.",
                "Press 'x' to start over with an empty lot.",
            ],
            Self::Pricing => &[
                "Demo: free, 100 spots, single lot.",
                "Standard: multiple lots, history and exports.",
                "Enterprise: custom integrations and support.",
            ],
            Self::Contact => &[
                "Questions or a pilot installation?",
                "Reach the SmartPark team through your sales contact.",
            ],
        }
    }
}

/// Rendered rows of the page, one per line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLine {
    Heading(AboutSection),
    Body(AboutSection, &'static str),
    Blank,
}

/// About page state: layout, reveal tracking and scroll position.
#[derive(Debug, Clone)]
pub struct AboutPage {
    lines: Vec<PageLine>,
    spans: Vec<(AboutSection, SectionSpan)>,
    observer: RevealObserver<AboutSection>,
    scroll: SmoothScroll,
    viewport_height: u16,
}

impl Default for AboutPage {
    fn default() -> Self {
        Self::new(SmoothScroll::default())
    }
}

impl AboutPage {
    pub fn new(scroll: SmoothScroll) -> Self {
        let mut lines = Vec::new();
        let mut spans = Vec::new();
        let mut observer = RevealObserver::default();

        for section in AboutSection::iter() {
            let top = lines.len() as u16;
            lines.push(PageLine::Heading(section));
            for &text in section.body() {
                lines.push(PageLine::Body(section, text));
            }
            spans.push((
                section,
                SectionSpan {
                    top,
                    height: lines.len() as u16 - top,
                },
            ));
            // Spacing rows between sections belong to no section
            for _ in 0..4 {
                lines.push(PageLine::Blank);
            }
            observer.observe(section);
        }

        Self {
            lines,
            spans,
            observer,
            scroll,
            viewport_height: 0,
        }
    }

    pub fn lines(&self) -> &[PageLine] {
        &self.lines
    }

    pub fn spans(&self) -> &[(AboutSection, SectionSpan)] {
        &self.spans
    }

    pub fn offset(&self) -> u16 {
        self.scroll.offset()
    }

    pub fn is_revealed(&self, section: AboutSection) -> bool {
        self.observer.is_revealed(section)
    }

    pub fn is_animating(&self) -> bool {
        self.scroll.is_animating()
    }

    /// Page rows visible at the last [`update`](Self::update)
    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    fn max_offset(&self) -> u16 {
        (self.lines.len() as u16).saturating_sub(self.viewport_height)
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            offset: self.scroll.offset(),
            height: self.viewport_height,
        }
    }

    /// Advance scrolling to `now` for a viewport of `height` rows and reveal
    /// whatever came into view. Returns newly revealed sections.
    pub fn update(&mut self, height: u16, now: Instant) -> Vec<AboutSection> {
        self.viewport_height = height;
        self.scroll.tick(now);
        if self.scroll.offset() > self.max_offset() {
            let max = self.max_offset();
            self.scroll.jump_to(max, max);
        }
        let viewport = self.viewport();
        self.observer.update(viewport, &self.spans)
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max = self.max_offset();
        self.scroll.scroll_by(delta, max);
    }

    /// Start a smooth scroll to `section`'s heading.
    pub fn navigate(&mut self, section: AboutSection, now: Instant) {
        if let Some((_, span)) = self.spans.iter().find(|(s, _)| *s == section) {
            let max = self.max_offset();
            self.scroll.scroll_to(span.top, max, now);
        }
    }

    /// Follow an in-page link; unknown anchors are ignored.
    pub fn follow_href(&mut self, href: &str, now: Instant) -> bool {
        match AboutSection::from_href(href) {
            Some(section) => {
                self.navigate(section, now);
                true
            }
            None => false,
        }
    }
}
