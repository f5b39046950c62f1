//! Header and common widget rendering
//!
//! The title bar, the key-hint nav bar and the help overlay are shared by
//! every screen.

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::{KeybindingContext, NavBarItem};
use crate::theme::{Colors, Styles};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render a title section
pub fn render_title(f: &mut Frame, area: Rect, title: &str) {
    let title_widget = Paragraph::new(title)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active()),
        )
        .alignment(Alignment::Center)
        .style(Styles::title());
    f.render_widget(title_widget, area);
}

/// Build the single-line key hint bar
fn nav_bar_line(items: &[NavBarItem]) -> Line<'static> {
    let mut spans = Vec::with_capacity(items.len() * 3);
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  ", Styles::nav_hint()));
        }
        spans.push(Span::styled(item.key_display.clone(), Styles::key_label()));
        spans.push(Span::styled(
            format!(" {}", item.action_label),
            Style::default().fg(Colors::FG_SECONDARY),
        ));
    }
    Line::from(spans)
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let items = keybinding_ctx.get_nav_items(&state.mode);
    let nav_bar = Paragraph::new(nav_bar_line(&items)).alignment(Alignment::Center);
    f.render_widget(nav_bar, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(&state.mode, keybinding_ctx);
    let area = f.area();
    help_overlay.render(f, area);
}
