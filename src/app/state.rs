//! Application state definitions
//!
//! Contains the UI-side state of the dashboard: which screen is shown, the
//! status line, the grid cursor and the help overlay flag. Lot data lives in
//! the [`LotStore`](crate::lot::LotStore), not here.

use crate::lot::LOT_CAPACITY;
use crate::presenter::{GRID_COLUMNS, StatusLine};
use strum::Display;

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AppMode {
    /// Spot grid, KPIs and status line
    Dashboard,
    /// Product page with reveal-on-scroll sections
    About,
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// Message of the last operation; cleared by the periodic refresh
    pub status: StatusLine,
    /// Index (0-based, id order) of the grid cell under the cursor
    pub selected_spot: usize,
    /// Whether help overlay is visible
    pub help_visible: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Dashboard,
            status: StatusLine::empty(),
            selected_spot: 0,
            help_visible: false,
        }
    }
}

impl AppState {
    /// Move the grid cursor by `dx` columns and `dy` rows, stopping at the
    /// grid edges.
    pub fn move_selection(&mut self, dx: i32, dy: i32) {
        let columns = GRID_COLUMNS as i32;
        let rows = (LOT_CAPACITY / GRID_COLUMNS) as i32;
        let row = self.selected_spot as i32 / columns;
        let column = self.selected_spot as i32 % columns;

        let row = (row + dy).clamp(0, rows - 1);
        let column = (column + dx).clamp(0, columns - 1);
        self.selected_spot = (row * columns + column) as usize;
    }

    /// Id of the spot under the cursor
    pub fn selected_spot_id(&self) -> u32 {
        self.selected_spot as u32 + 1
    }
}
