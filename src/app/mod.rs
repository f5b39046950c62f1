//! Application module
//!
//! Contains the main application logic, state management, and event handling.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode)
//! - Main module - App struct and event loop

mod state;

// Re-export state types for external use
pub use state::{AppMode, AppState};

use crate::animator::AboutPage;
use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::error::Result;
use crate::lot::{LOADED_MESSAGE, LotStore, OperationResult};
use crate::presenter::{DashboardView, RefreshTimer, StatusLine};
use crate::storage::BlobStore;
use crate::ui::{self, UiRenderer};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::Backend, Frame, Terminal};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Upper bound on how long the loop blocks waiting for input, so scroll
/// animations keep moving.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Main application struct
pub struct App<S> {
    state: AppState,
    lot: LotStore<S, ChaCha8Rng>,
    refresh: RefreshTimer,
    about: AboutPage,
    ui_renderer: UiRenderer,
    /// Keybinding context for key resolution and navigation hints
    keybinding_context: KeybindingContext,
}

impl<S: BlobStore> App<S> {
    /// Create the application around an already loaded lot
    pub fn new(lot: LotStore<S, ChaCha8Rng>, refresh_interval: Duration) -> Self {
        Self {
            state: AppState::default(),
            lot,
            refresh: RefreshTimer::new(refresh_interval),
            about: AboutPage::default(),
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
        }
    }

    /// Show the load message and (re)arm the refresh timer.
    ///
    /// Safe to call again: the previous schedule is cancelled first, so only
    /// one timer is ever live.
    pub fn initialize(&mut self, now: Instant) {
        self.state.status = StatusLine::info(LOADED_MESSAGE);
        self.refresh.cancel();
        self.refresh.start(now);
        info!(
            occupied = self.lot.occupied_count(),
            available = self.lot.available_count(),
            "Dashboard initialized"
        );
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn lot(&self) -> &LotStore<S, ChaCha8Rng> {
        &self.lot
    }

    pub fn about(&self) -> &AboutPage {
        &self.about
    }

    pub fn refresh_timer(&self) -> &RefreshTimer {
        &self.refresh
    }

    /// Render model of the dashboard at the lot clock's current time
    pub fn dashboard_view(&self) -> DashboardView {
        DashboardView::build(
            self.lot.spots(),
            self.lot.now_millis(),
            self.state.status.clone(),
        )
    }

    fn apply(&mut self, result: &OperationResult) {
        self.state.status = StatusLine::from_result(result);
    }

    /// A car enters
    pub fn occupy(&mut self) -> Result<()> {
        let result = self.lot.occupy_random_spot()?;
        self.apply(&result);
        Ok(())
    }

    /// A car leaves
    pub fn release(&mut self) -> Result<()> {
        let result = self.lot.release_random_spot()?;
        self.apply(&result);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<()> {
        let result = self.lot.reset()?;
        self.apply(&result);
        Ok(())
    }

    /// Service the refresh timer. Returns true when a refresh fired, in
    /// which case the status line has been cleared.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        if !self.refresh.poll(now) {
            return false;
        }
        debug!("Periodic refresh");
        self.state.status = StatusLine::empty();
        true
    }

    /// Handle a key press. Returns true when the user asked to quit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent, now: Instant) -> Result<bool> {
        if self.state.help_visible {
            // Help overlay is modal
            if matches!(key_event.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.state.help_visible = false;
            }
            return Ok(false);
        }

        let Some(action) = self.keybinding_context.action_for(
            &self.state.mode,
            key_event.code,
            key_event.modifiers,
        ) else {
            return Ok(false);
        };
        debug!(?action, mode = %self.state.mode, "Key action");

        match action {
            KeyAction::Occupy => self.occupy()?,
            KeyAction::Release => self.release()?,
            KeyAction::Reset => self.reset()?,
            KeyAction::NavigateUp => self.state.move_selection(0, -1),
            KeyAction::NavigateDown => self.state.move_selection(0, 1),
            KeyAction::NavigateLeft => self.state.move_selection(-1, 0),
            KeyAction::NavigateRight => self.state.move_selection(1, 0),
            KeyAction::ScrollUp => self.about.scroll_by(-1),
            KeyAction::ScrollDown => self.about.scroll_by(1),
            KeyAction::PageUp => {
                let page = i32::from(self.about.viewport_height().max(1));
                self.about.scroll_by(-page);
            }
            KeyAction::PageDown => {
                let page = i32::from(self.about.viewport_height().max(1));
                self.about.scroll_by(page);
            }
            KeyAction::JumpTo(section) => {
                let href = section.anchor();
                if !self.about.follow_href(&href, now) {
                    debug!(%href, "Ignoring unknown anchor");
                }
            }
            KeyAction::ShowAbout => self.state.mode = AppMode::About,
            KeyAction::Back => self.state.mode = AppMode::Dashboard,
            KeyAction::Help => self.state.help_visible = true,
            KeyAction::Quit => return Ok(true),
        }
        Ok(false)
    }

    /// Draw one frame; advances the About page animation when it is shown.
    pub fn draw(&mut self, f: &mut Frame, now: Instant) {
        if self.state.mode == AppMode::About {
            let (content_area, _) = ui::split_main(f.area());
            let revealed = self
                .about
                .update(ui::page_viewport_height(content_area.height), now);
            for section in revealed {
                debug!(%section, "Section revealed");
            }
        }
        let view = self.dashboard_view();
        self.ui_renderer.render(
            f,
            &self.state,
            &view,
            &self.about,
            &self.keybinding_context,
        );
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");
        self.initialize(Instant::now());

        loop {
            let now = Instant::now();
            self.on_tick(now);
            terminal.draw(|f| self.draw(f, now))?;

            let timeout = self
                .refresh
                .time_until_due(Instant::now())
                .map_or(FRAME_INTERVAL, |due| due.min(FRAME_INTERVAL));
            if event::poll(timeout)? {
                if let Event::Key(key_event) = event::read()? {
                    if key_event.kind == KeyEventKind::Press
                        && self.handle_key_event(key_event, Instant::now())?
                    {
                        break;
                    }
                }
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Stop the refresh timer
    pub fn shutdown(&mut self) {
        if self.refresh.is_active() {
            debug!("Cancelling refresh timer");
        }
        self.refresh.cancel();
    }
}

impl<S> Drop for App<S> {
    fn drop(&mut self) {
        self.refresh.cancel();
    }
}
