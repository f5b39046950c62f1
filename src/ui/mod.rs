//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - Title, nav bar and help overlay
//! - `dashboard` - KPIs, status line, parking map and spot details
//! - `about` - Product page with reveal-on-scroll sections

mod about;
mod dashboard;
mod header;

pub use about::page_viewport_height;

use crate::animator::AboutPage;
use crate::app::{AppMode, AppState};
use crate::components::keybindings::KeybindingContext;
use crate::presenter::DashboardView;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Main content area and the one-row nav bar below it
pub fn split_main(area: Rect) -> (Rect, Rect) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Main content area
            Constraint::Length(1), // Navigation bar
        ])
        .split(area);
    (main_chunks[0], main_chunks[1])
}

/// UI renderer for the application
///
/// Entry point for drawing a frame; delegates to the screen submodules.
#[derive(Debug, Default)]
pub struct UiRenderer;

impl UiRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the complete UI for the current mode
    pub fn render(
        &self,
        f: &mut Frame,
        state: &AppState,
        view: &DashboardView,
        about: &AboutPage,
        keybinding_ctx: &KeybindingContext,
    ) {
        let (content_area, nav_bar_area) = split_main(f.area());

        match state.mode {
            AppMode::Dashboard => {
                dashboard::render_dashboard_in_area(f, state, view, content_area);
            }
            AppMode::About => {
                about::render_about_in_area(f, about, content_area);
            }
        }

        header::render_nav_bar(f, state, keybinding_ctx, nav_bar_area);

        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
    }
}
