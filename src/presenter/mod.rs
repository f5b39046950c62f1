//! Lot presenter
//!
//! Turns the current lot into a [`DashboardView`]: the four KPI figures, the
//! status line of the last operation, and one [`SpotCell`] per spot with a
//! tooltip for occupied spots. The view is plain data; the TUI and the
//! headless `map` command both render from it.

mod timer;

pub use timer::{DEFAULT_REFRESH_INTERVAL, MIN_REFRESH_INTERVAL, RefreshTimer};

use crate::lot::{Kpis, OperationResult, Spot};
use std::fmt::Write as _;

/// Cells per grid row
pub const GRID_COLUMNS: usize = 10;

/// How the status line is styled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    /// The last operation had nothing to do (lot full, nothing to release)
    Warning,
}

/// Message shown under the KPIs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusLine {
    pub message: String,
    pub kind: StatusKind,
}

impl StatusLine {
    /// No message, as shown after a timer refresh
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn from_result(result: &OperationResult) -> Self {
        Self {
            message: result.message.clone(),
            kind: if result.success {
                StatusKind::Info
            } else {
                StatusKind::Warning
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }
}

/// Details shown for an occupied spot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub spot_label: String,
    pub plate: String,
    pub parked_for: String,
}

impl Tooltip {
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Spot: {}", self.spot_label),
            format!("Plate: {}", self.plate),
            format!("Parked for: {}", self.parked_for),
        ]
    }
}

/// One grid cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotCell {
    pub id: u32,
    pub occupied: bool,
    pub tooltip: Option<Tooltip>,
}

impl SpotCell {
    fn from_spot(spot: &Spot, now_millis: i64) -> Self {
        let tooltip = spot.is_occupied.then(|| Tooltip {
            spot_label: format!("P{}", spot.id),
            plate: spot.vehicle_plate.clone().unwrap_or_default(),
            parked_for: format_elapsed(spot.entry_time, now_millis),
        });
        Self {
            id: spot.id,
            occupied: spot.is_occupied,
            tooltip,
        }
    }
}

/// Everything the dashboard shows, already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub total_capacity: String,
    pub available_spots: String,
    pub occupied_spots: String,
    pub occupancy_rate: String,
    pub status: StatusLine,
    pub cells: Vec<SpotCell>,
}

impl DashboardView {
    /// Build the view of `spots` as seen at `now_millis`.
    pub fn build(spots: &[Spot], now_millis: i64, status: StatusLine) -> Self {
        let kpis = Kpis::from_spots(spots);
        Self {
            total_capacity: kpis.capacity.to_string(),
            available_spots: kpis.available.to_string(),
            occupied_spots: kpis.occupied.to_string(),
            occupancy_rate: kpis.occupancy_rate_display(),
            status,
            cells: spots
                .iter()
                .map(|spot| SpotCell::from_spot(spot, now_millis))
                .collect(),
        }
    }

    /// Cells split into grid rows
    pub fn rows(&self) -> impl Iterator<Item = &[SpotCell]> {
        self.cells.chunks(GRID_COLUMNS)
    }

    /// Plain-text rendering for non-interactive output.
    ///
    /// Free cells print as `[ 12]`, occupied ones as `[#12]`, followed by the
    /// tooltip of every occupied spot.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total capacity:  {}", self.total_capacity);
        let _ = writeln!(out, "Occupied spots:  {}", self.occupied_spots);
        let _ = writeln!(out, "Available spots: {}", self.available_spots);
        let _ = writeln!(out, "Occupancy rate:  {}", self.occupancy_rate);
        if !self.status.is_empty() {
            let _ = writeln!(out, "Status: {}", self.status.message);
        }
        out.push('\n');

        for row in self.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|cell| {
                    if cell.occupied {
                        format!("[#{:>2}]", cell.id)
                    } else {
                        format!("[ {:>2}]", cell.id)
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", line.join(" "));
        }

        let occupied: Vec<&Tooltip> = self
            .cells
            .iter()
            .filter_map(|cell| cell.tooltip.as_ref())
            .collect();
        if !occupied.is_empty() {
            out.push('\n');
            for tooltip in occupied {
                let _ = writeln!(
                    out,
                    "{:<5} {}  {}",
                    tooltip.spot_label, tooltip.plate, tooltip.parked_for
                );
            }
        }
        out
    }
}

/// Time since `entry_millis`, most significant non-zero unit pair first:
/// `2h 5m`, `4m 10s` or `37s`. Missing timestamps render as `N/A`.
pub fn format_elapsed(entry_millis: Option<i64>, now_millis: i64) -> String {
    let Some(entry) = entry_millis else {
        return "N/A".to_string();
    };
    let seconds = now_millis.saturating_sub(entry).max(0) / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lot::LOT_CAPACITY;

    const NOW: i64 = 1_734_000_000_000;

    fn sample_lot() -> Vec<Spot> {
        (1..=LOT_CAPACITY as u32)
            .map(|id| match id {
                7 => Spot::occupied(id, "KR 54321", NOW - 3_725_000),
                42 => Spot::occupied(id, "WA 00001", NOW - 61_000),
                _ => Spot::free(id),
            })
            .collect()
    }

    #[test]
    fn test_format_elapsed_units() {
        assert_eq!(format_elapsed(Some(NOW - 37_000), NOW), "37s");
        assert_eq!(format_elapsed(Some(NOW - 250_000), NOW), "4m 10s");
        assert_eq!(format_elapsed(Some(NOW - 7_500_000), NOW), "2h 5m");
        assert_eq!(format_elapsed(Some(NOW - 3_600_000), NOW), "1h 0m");
        assert_eq!(format_elapsed(Some(NOW - 999), NOW), "0s");
    }

    #[test]
    fn test_format_elapsed_edge_cases() {
        assert_eq!(format_elapsed(None, NOW), "N/A");
        // Entry in the future clamps to zero
        assert_eq!(format_elapsed(Some(NOW + 10_000), NOW), "0s");
    }

    #[test]
    fn test_format_elapsed_extreme_timestamps() {
        assert_eq!(format_elapsed(Some(i64::MAX), NOW), "0s");
        let ancient = format_elapsed(Some(i64::MIN), NOW);
        assert!(ancient.ends_with('m'), "{ancient}");

        let mut spots = sample_lot();
        spots[0] = Spot::occupied(1, "KR 00001", i64::MIN);
        let view = DashboardView::build(&spots, NOW, StatusLine::empty());
        assert!(view.cells[0].tooltip.is_some());
    }

    #[test]
    fn test_view_kpis() {
        let view = DashboardView::build(&sample_lot(), NOW, StatusLine::empty());
        assert_eq!(view.total_capacity, "100");
        assert_eq!(view.occupied_spots, "2");
        assert_eq!(view.available_spots, "98");
        assert_eq!(view.occupancy_rate, "2.0%");
    }

    #[test]
    fn test_only_occupied_cells_have_tooltips() {
        let view = DashboardView::build(&sample_lot(), NOW, StatusLine::empty());
        assert_eq!(view.cells.len(), LOT_CAPACITY);

        let with_tooltip: Vec<u32> = view
            .cells
            .iter()
            .filter(|c| c.tooltip.is_some())
            .map(|c| c.id)
            .collect();
        assert_eq!(with_tooltip, vec![7, 42]);

        let tooltip = view.cells[6].tooltip.as_ref().unwrap();
        assert_eq!(
            tooltip.lines(),
            [
                "Spot: P7".to_string(),
                "Plate: KR 54321".to_string(),
                "Parked for: 1h 2m".to_string(),
            ]
        );
    }

    #[test]
    fn test_cells_in_id_order_and_rows_of_ten() {
        let view = DashboardView::build(&sample_lot(), NOW, StatusLine::empty());
        let ids: Vec<u32> = view.cells.iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=100).collect::<Vec<u32>>());
        assert_eq!(view.rows().count(), 10);
        assert!(view.rows().all(|row| row.len() == GRID_COLUMNS));
    }

    #[test]
    fn test_status_kind_follows_result() {
        let ok = OperationResult {
            success: true,
            message: "Car left spot #3.".to_string(),
            spot_id: Some(3),
            plate: None,
        };
        let full = OperationResult {
            success: false,
            message: crate::lot::LOT_FULL_MESSAGE.to_string(),
            spot_id: None,
            plate: None,
        };
        assert_eq!(StatusLine::from_result(&ok).kind, StatusKind::Info);
        assert_eq!(StatusLine::from_result(&full).kind, StatusKind::Warning);
    }

    #[test]
    fn test_text_rendering() {
        let view = DashboardView::build(
            &sample_lot(),
            NOW,
            StatusLine::info("Demo data loaded from storage."),
        );
        let text = view.to_text();
        assert!(text.contains("Occupancy rate:  2.0%"));
        assert!(text.contains("Status: Demo data loaded from storage."));
        assert!(text.contains("[# 7]"));
        assert!(text.contains("[#42]"));
        assert!(text.contains("[ 43]"));
        assert!(text.contains("P42   WA 00001  1m 1s"));
    }
}
