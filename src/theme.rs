//! Centralized theme and styling for the TUI
//!
//! This module provides a single source of truth for all colors, styles,
//! and visual constants used throughout the dashboard.
//!
//! # Usage
//! ```rust
//! use smartpark::theme::{Colors, Styles, Theme};
//! use smartpark::presenter::StatusKind;
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! let status_style = Theme::status_style(StatusKind::Warning);
//! ```

use crate::presenter::StatusKind;
use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    // -------------------------------------------------------------------------
    // Base Colors (backgrounds, foregrounds)
    // -------------------------------------------------------------------------

    /// Primary dark background - used for panels and the help overlay
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Accent Colors (branding, emphasis)
    // -------------------------------------------------------------------------

    /// Primary accent color - used for borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Secondary accent color - used for selected items, emphasis
    pub const SECONDARY: Color = Color::Yellow;

    // -------------------------------------------------------------------------
    // Semantic Colors (status, feedback)
    // -------------------------------------------------------------------------

    /// Success/positive feedback
    pub const SUCCESS: Color = Color::Green;

    /// Error/danger feedback
    pub const ERROR: Color = Color::Red;

    // -------------------------------------------------------------------------
    // Lot Colors
    // -------------------------------------------------------------------------

    /// Free spot cell
    pub const SPOT_FREE: Color = Color::Green;

    /// Occupied spot cell
    pub const SPOT_OCCUPIED: Color = Color::Red;

    /// Text on a spot cell
    pub const SPOT_LABEL: Color = Color::Black;

    // -------------------------------------------------------------------------
    // UI Element Colors
    // -------------------------------------------------------------------------

    /// Active border color
    pub const BORDER_ACTIVE: Color = Color::Cyan;

    /// Inactive/unfocused border color
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Navigation hint color
    pub const NAV_HINT: Color = Color::DarkGray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Muted/secondary text
    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Main title style (cyan, bold)
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// KPI figure
    pub fn kpi_value() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Active border style
    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    /// Inactive border style
    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Panel background
    pub fn panel_bg() -> Style {
        Style::default().bg(Colors::BG_PRIMARY)
    }

    /// Navigation hint (keybindings)
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }

    /// Key label in the nav bar and help overlay
    pub fn key_label() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }
}

// =============================================================================
// THEME CONTEXT
// =============================================================================

/// Theme context providing semantic style lookups
pub struct Theme;

impl Theme {
    /// Style for the status line
    pub fn status_style(kind: StatusKind) -> Style {
        match kind {
            StatusKind::Info => Style::default().fg(Colors::FG_PRIMARY),
            StatusKind::Warning => Style::default()
                .fg(Colors::ERROR)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Style for a grid cell
    pub fn spot_style(occupied: bool, selected: bool) -> Style {
        let bg = if occupied {
            Colors::SPOT_OCCUPIED
        } else {
            Colors::SPOT_FREE
        };
        let style = Style::default().fg(Colors::SPOT_LABEL).bg(bg);
        if selected {
            style
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    /// Style for an About section heading; unrevealed sections stay dim
    pub fn section_heading(revealed: bool) -> Style {
        if revealed {
            Styles::title()
        } else {
            Styles::text_muted()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_styles_differ() {
        assert_ne!(
            Theme::status_style(StatusKind::Info),
            Theme::status_style(StatusKind::Warning)
        );
        assert_eq!(
            Theme::status_style(StatusKind::Warning).fg,
            Some(Colors::ERROR)
        );
    }

    #[test]
    fn test_spot_styles() {
        assert_eq!(Theme::spot_style(false, false).bg, Some(Colors::SPOT_FREE));
        assert_eq!(Theme::spot_style(true, false).bg, Some(Colors::SPOT_OCCUPIED));
        assert!(
            Theme::spot_style(true, true)
                .add_modifier
                .contains(Modifier::REVERSED)
        );
    }
}
