//! Parking lot store
//!
//! Owns the ordered sequence of [`LOT_CAPACITY`] spots and mirrors it to a
//! [`BlobStore`] under a single key. Every mutation re-serializes the whole
//! sequence and overwrites the blob.
//!
//! # Randomness and time
//!
//! Spot selection, plate generation and the initial random occupancy all
//! draw from the `rng` the store was built with, and timestamps come from
//! its [`Clock`]. Seeding a `ChaCha8Rng` and using a
//! [`FixedClock`](crate::clock::FixedClock) makes every operation
//! reproducible.

mod kpi;
mod spot;

pub use kpi::Kpis;
pub use spot::{Spot, generate_plate, is_valid_plate};

use crate::clock::Clock;
use crate::error::Result;
use crate::storage::BlobStore;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

/// Number of spots in the lot. Fixed for the lifetime of the store.
pub const LOT_CAPACITY: usize = 100;

/// Key the lot blob is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "smartParkDemoData";

/// Probability that a spot starts occupied in a freshly generated lot
pub const DEFAULT_INITIAL_OCCUPANCY: f64 = 0.3;

/// Initially parked cars entered at most this long ago (one hour)
const MAX_INITIAL_PARKED_MS: i64 = 3_600_000;

pub const LOT_FULL_MESSAGE: &str = "No free spots! The parking lot is full.";
pub const NOTHING_TO_RELEASE_MESSAGE: &str = "No occupied spots to release.";
pub const RESET_MESSAGE: &str = "Demo data has been reset. The parking lot is now empty.";
pub const LOADED_MESSAGE: &str = "Demo data loaded from storage.";

/// Outcome of a lot operation.
///
/// A full lot or an empty lot is not an error: the operation reports
/// `success = false` with a fixed message and leaves the lot untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
    /// Spot affected by a successful occupy/release
    pub spot_id: Option<u32>,
    /// Plate assigned by a successful occupy
    pub plate: Option<String>,
}

impl OperationResult {
    fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            spot_id: None,
            plate: None,
        }
    }

    fn occupied(spot_id: u32, plate: String) -> Self {
        Self {
            success: true,
            message: format!("Car entered spot #{spot_id} ({plate})."),
            spot_id: Some(spot_id),
            plate: Some(plate),
        }
    }

    fn released(spot_id: u32) -> Self {
        Self {
            success: true,
            message: format!("Car left spot #{spot_id}."),
            spot_id: Some(spot_id),
            plate: None,
        }
    }
}

/// Options controlling where the lot lives and how a fresh lot is seeded
#[derive(Debug, Clone, PartialEq)]
pub struct LotOptions {
    pub storage_key: String,
    pub initial_occupancy: f64,
}

impl Default for LotOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            initial_occupancy: DEFAULT_INITIAL_OCCUPANCY,
        }
    }
}

/// The lot and its persistence.
pub struct LotStore<S, R> {
    store: S,
    rng: R,
    clock: Box<dyn Clock>,
    options: LotOptions,
    spots: Vec<Spot>,
}

impl<S: BlobStore, R: Rng> LotStore<S, R> {
    /// Build a store and immediately [`load`](Self::load) the lot.
    pub fn open(store: S, rng: R, clock: Box<dyn Clock>, options: LotOptions) -> Result<Self> {
        let mut lot = Self {
            store,
            rng,
            clock,
            options,
            spots: Vec::new(),
        };
        lot.load()?;
        Ok(lot)
    }

    /// Read the lot from the blob store.
    ///
    /// A missing blob generates and persists a randomized lot. A present
    /// blob is taken verbatim; malformed JSON is returned as an error.
    pub fn load(&mut self) -> Result<()> {
        match self.store.get(&self.options.storage_key)? {
            Some(blob) => {
                self.spots = serde_json::from_str(&blob)?;
                if self.spots.len() != LOT_CAPACITY {
                    warn!(
                        key = %self.options.storage_key,
                        spots = self.spots.len(),
                        expected = LOT_CAPACITY,
                        "Stored lot does not have the expected number of spots"
                    );
                }
                debug!(
                    key = %self.options.storage_key,
                    spots = self.spots.len(),
                    "Loaded lot from storage"
                );
            }
            None => {
                info!("Initializing SmartPark demo data");
                self.spots = self.generate_spots(self.options.initial_occupancy);
                self.save()?;
            }
        }
        Ok(())
    }

    /// Serialize the current sequence and overwrite the blob.
    pub fn save(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.spots)?;
        self.store.set(&self.options.storage_key, &blob)
    }

    /// Replace the whole sequence and persist it.
    pub fn replace(&mut self, spots: Vec<Spot>) -> Result<()> {
        self.spots = spots;
        self.save()
    }

    /// Drop the persisted blob and start over with an empty lot.
    pub fn reset(&mut self) -> Result<OperationResult> {
        info!("Resetting SmartPark demo data");
        self.store.remove(&self.options.storage_key)?;
        self.spots = self.generate_spots(0.0);
        self.save()?;
        Ok(OperationResult {
            success: true,
            message: RESET_MESSAGE.to_string(),
            spot_id: None,
            plate: None,
        })
    }

    /// Park a car on a uniformly chosen free spot.
    pub fn occupy_random_spot(&mut self) -> Result<OperationResult> {
        let free: Vec<usize> = self
            .spots
            .iter()
            .enumerate()
            .filter(|(_, spot)| !spot.is_occupied)
            .map(|(index, _)| index)
            .collect();

        let Some(&index) = free.choose(&mut self.rng) else {
            debug!("Occupy requested but the lot is full");
            return Ok(OperationResult::failure(LOT_FULL_MESSAGE));
        };

        let plate = generate_plate(&mut self.rng);
        let now = self.clock.now_millis();
        let spot = &mut self.spots[index];
        spot.occupy(plate.clone(), now);
        let spot_id = spot.id;

        self.save()?;
        info!(spot_id, plate = %plate, "Car entered");
        Ok(OperationResult::occupied(spot_id, plate))
    }

    /// Free a uniformly chosen occupied spot.
    pub fn release_random_spot(&mut self) -> Result<OperationResult> {
        let occupied: Vec<usize> = self
            .spots
            .iter()
            .enumerate()
            .filter(|(_, spot)| spot.is_occupied)
            .map(|(index, _)| index)
            .collect();

        let Some(&index) = occupied.choose(&mut self.rng) else {
            debug!("Release requested but no spot is occupied");
            return Ok(OperationResult::failure(NOTHING_TO_RELEASE_MESSAGE));
        };

        let spot = &mut self.spots[index];
        spot.release();
        let spot_id = spot.id;

        self.save()?;
        info!(spot_id, "Car left");
        Ok(OperationResult::released(spot_id))
    }

    /// Spots in id order
    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn spot(&self, id: u32) -> Option<&Spot> {
        self.spots.iter().find(|spot| spot.id == id)
    }

    pub fn available_count(&self) -> usize {
        self.spots.iter().filter(|spot| !spot.is_occupied).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.spots.iter().filter(|spot| spot.is_occupied).count()
    }

    pub fn kpis(&self) -> Kpis {
        Kpis::from_spots(&self.spots)
    }

    /// Current time according to the store's clock
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// The underlying blob store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn storage_key(&self) -> &str {
        &self.options.storage_key
    }

    /// Build a fresh lot where each spot is occupied with probability
    /// `occupancy`, parked at some point within the last hour.
    fn generate_spots(&mut self, occupancy: f64) -> Vec<Spot> {
        let now = self.clock.now_millis();
        let occupancy = occupancy.clamp(0.0, 1.0);
        let rng = &mut self.rng;

        (1..=LOT_CAPACITY as u32)
            .map(|id| {
                if occupancy > 0.0 && rng.gen_bool(occupancy) {
                    let plate = generate_plate(&mut *rng);
                    let parked_for = rng.gen_range(0..MAX_INITIAL_PARKED_MS);
                    Spot::occupied(id, plate, now - parked_for)
                } else {
                    Spot::free(id)
                }
            })
            .collect()
    }
}
