//! Aggregate lot figures shown on the dashboard

use super::{LOT_CAPACITY, Spot};

/// Capacity, occupied and available counts of a lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kpis {
    pub capacity: usize,
    pub occupied: usize,
    pub available: usize,
}

impl Kpis {
    pub fn from_spots(spots: &[Spot]) -> Self {
        let occupied = spots.iter().filter(|spot| spot.is_occupied).count();
        Self {
            capacity: LOT_CAPACITY,
            occupied,
            available: spots.len() - occupied,
        }
    }

    /// Occupied share of capacity, in percent
    pub fn occupancy_rate(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.occupied as f64 / self.capacity as f64 * 100.0
    }

    /// Occupancy rate with one decimal place, e.g. `35.0%`
    pub fn occupancy_rate_display(&self) -> String {
        format!("{:.1}%", self.occupancy_rate())
    }
}
