//! Help overlay component
//!
//! Displays context-sensitive help in a centered floating panel.

use super::keybindings::{HelpSection, KeybindingContext};
use crate::app::AppMode;
use crate::theme::{Colors, Styles};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const WIDTH_PERCENT: u16 = 60;
const MIN_WIDTH: u16 = 44;
const MAX_WIDTH: u16 = 72;

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given mode
    pub fn new(mode: &AppMode, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(mode);
        Self {
            content: Self::build_content(&sections, mode),
        }
    }

    /// Build the help content from sections
    fn build_content(sections: &[HelpSection], mode: &AppMode) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            "  SmartPark Help  ",
            Styles::title(),
        )]));
        lines.push(Line::from(""));

        lines.push(Line::from(vec![
            Span::styled("Current: ", Style::default().fg(Colors::FG_MUTED)),
            Span::styled(mode.to_string(), Style::default().fg(Colors::SECONDARY)),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )]));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{:<10}", key), Styles::key_label()),
                    Span::styled(description.clone(), Styles::text()),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(Colors::FG_MUTED),
        )]));

        lines
    }

    /// Number of content rows
    pub fn height(&self) -> u16 {
        self.content.len() as u16
    }

    /// Render the help overlay centered over `parent`
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let area = centered_rect(parent, self.height() + 2);
        f.render_widget(Clear, area);

        let panel = Paragraph::new(self.content.clone())
            .alignment(Alignment::Left)
            .style(Styles::panel_bg())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::border_active())
                    .title(" Help "),
            );
        f.render_widget(panel, area);
    }
}

/// A rectangle of the overlay's width and `height` rows, centered in `parent`
fn centered_rect(parent: Rect, height: u16) -> Rect {
    let width = (parent.width * WIDTH_PERCENT / 100)
        .clamp(MIN_WIDTH, MAX_WIDTH)
        .min(parent.width);
    let height = height.min(parent.height);
    Rect {
        x: parent.x + (parent.width - width) / 2,
        y: parent.y + (parent.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let area = centered_rect(parent, 20);
        assert_eq!(area.width, 60);
        assert_eq!(area.height, 20);
        assert_eq!(area.x, 20);
        assert_eq!(area.y, 10);

        let tiny = Rect::new(0, 0, 30, 5);
        let area = centered_rect(tiny, 20);
        assert!(area.width <= 30 && area.height <= 5);
    }

    #[test]
    fn test_content_mentions_mode_and_keys() {
        let ctx = KeybindingContext::new();
        let overlay = HelpOverlay::new(&AppMode::Dashboard, &ctx);
        let text: Vec<String> = overlay
            .content
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(text.iter().any(|l| l.contains("Current: Dashboard")));
        assert!(text.iter().any(|l| l.contains("Car enters")));
    }
}
