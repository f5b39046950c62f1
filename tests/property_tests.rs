//! Property-Based Tests for SmartPark
//!
//! Uses proptest for testing invariants across random operation sequences.
//!
//! These tests verify:
//! - Counts always add up to capacity
//! - Every spot keeps occupied/plate/entry time in step
//! - Occupy and release move the occupied count by exactly one
//! - Elapsed-time formatting and reveal/scroll invariants

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use smartpark::animator::{SectionSpan, SmoothScroll, Viewport};
use smartpark::lot::is_valid_plate;
use smartpark::{FixedClock, LOT_CAPACITY, LotOptions, LotStore, MemoryBlobStore, format_elapsed};
use std::time::{Duration, Instant};

const NOW: i64 = 1_734_000_000_000;

#[derive(Debug, Clone, Copy)]
enum Op {
    Occupy,
    Release,
    Reset,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Occupy),
        4 => Just(Op::Release),
        1 => Just(Op::Reset),
    ]
}

fn open_lot(seed: u64, occupancy: f64) -> LotStore<MemoryBlobStore, ChaCha8Rng> {
    LotStore::open(
        MemoryBlobStore::new(),
        ChaCha8Rng::seed_from_u64(seed),
        Box::new(FixedClock::new(NOW)),
        LotOptions {
            initial_occupancy: occupancy,
            ..LotOptions::default()
        },
    )
    .expect("memory store never fails")
}

// =============================================================================
// Lot Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any operation sequence keeps the lot consistent
    #[test]
    fn lot_invariants_hold(
        seed in any::<u64>(),
        occupancy in 0.0f64..=1.0,
        ops in prop::collection::vec(op_strategy(), 0..150),
    ) {
        let mut lot = open_lot(seed, occupancy);
        prop_assert_eq!(lot.spots().len(), LOT_CAPACITY);

        for op in ops {
            let before = lot.occupied_count();
            let snapshot = lot.spots().to_vec();

            match op {
                Op::Occupy => {
                    let result = lot.occupy_random_spot().unwrap();
                    if before == LOT_CAPACITY {
                        prop_assert!(!result.success);
                        prop_assert_eq!(lot.spots(), snapshot.as_slice());
                    } else {
                        prop_assert!(result.success);
                        prop_assert_eq!(lot.occupied_count(), before + 1);
                        let id = result.spot_id.unwrap();
                        let plate = lot.spot(id).unwrap().vehicle_plate.clone().unwrap();
                        prop_assert!(is_valid_plate(&plate));
                    }
                }
                Op::Release => {
                    let result = lot.release_random_spot().unwrap();
                    if before == 0 {
                        prop_assert!(!result.success);
                        prop_assert_eq!(lot.spots(), snapshot.as_slice());
                    } else {
                        prop_assert!(result.success);
                        prop_assert_eq!(lot.occupied_count(), before - 1);
                        let spot = lot.spot(result.spot_id.unwrap()).unwrap();
                        prop_assert!(spot.vehicle_plate.is_none());
                        prop_assert!(spot.entry_time.is_none());
                    }
                }
                Op::Reset => {
                    lot.reset().unwrap();
                    prop_assert_eq!(lot.occupied_count(), 0);
                }
            }

            prop_assert_eq!(lot.available_count() + lot.occupied_count(), LOT_CAPACITY);
            prop_assert!(lot.spots().iter().all(|s| s.is_consistent()));
            let ids: Vec<u32> = lot.spots().iter().map(|s| s.id).collect();
            prop_assert_eq!(ids, (1..=LOT_CAPACITY as u32).collect::<Vec<_>>());
        }
    }

    /// Fresh lots never carry entry times in the future or older than an hour
    #[test]
    fn generated_entry_times_in_range(seed in any::<u64>()) {
        let lot = open_lot(seed, 1.0);
        for spot in lot.spots() {
            let entry = spot.entry_time.unwrap();
            prop_assert!(entry <= NOW);
            prop_assert!(entry > NOW - 3_600_000);
        }
    }
}

// =============================================================================
// Presentation Invariants
// =============================================================================

proptest! {
    /// Elapsed text is one of the three shapes and never negative
    #[test]
    fn elapsed_format_shape(entry in any::<i32>()) {
        let text = format_elapsed(Some(NOW + i64::from(entry)), NOW);
        prop_assert!(!text.contains('-'));
        let shapes = text.ends_with('m') || text.ends_with('s');
        prop_assert!(shapes);
    }

    /// Visible fraction is always a fraction
    #[test]
    fn visible_fraction_bounded(
        top in 0u16..200,
        height in 0u16..50,
        offset in 0u16..200,
        view in 0u16..60,
    ) {
        let span = SectionSpan { top, height };
        let fraction = span.visible_fraction(Viewport { offset, height: view });
        prop_assert!((0.0..=1.0).contains(&fraction));
    }

    /// A smooth scroll always ends exactly on the clamped target
    #[test]
    fn smooth_scroll_lands_on_target(target in 0u16..300, max in 0u16..100) {
        let start = Instant::now();
        let mut scroll = SmoothScroll::new(Duration::from_millis(400));
        scroll.scroll_to(target, max, start);
        let end = scroll.tick(start + Duration::from_millis(400));
        prop_assert_eq!(end, target.min(max));
        prop_assert!(!scroll.is_animating());
    }
}
