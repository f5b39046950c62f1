//! Spot records and licence plate generation

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

const PLATE_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const PLATE_DIGITS: &[u8] = b"0123456789";

/// One parking space.
///
/// Serialized with the camelCase field names of the persisted blob:
/// `id`, `isOccupied`, `vehiclePlate`, `entryTime`.
///
/// # Invariants
///
/// - `vehicle_plate` and `entry_time` are both `Some` when `is_occupied`,
///   both `None` otherwise. [`Spot::occupy`] and [`Spot::release`] are the
///   only mutators and keep the three fields in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub id: u32,
    pub is_occupied: bool,
    #[serde(default)]
    pub vehicle_plate: Option<String>,
    #[serde(default, deserialize_with = "deserialize_entry_time")]
    pub entry_time: Option<i64>,
}

impl Spot {
    /// A free spot
    pub fn free(id: u32) -> Self {
        Self {
            id,
            is_occupied: false,
            vehicle_plate: None,
            entry_time: None,
        }
    }

    /// An occupied spot
    pub fn occupied(id: u32, plate: impl Into<String>, entry_time: i64) -> Self {
        Self {
            id,
            is_occupied: true,
            vehicle_plate: Some(plate.into()),
            entry_time: Some(entry_time),
        }
    }

    /// Park a vehicle here
    pub fn occupy(&mut self, plate: impl Into<String>, entry_time: i64) {
        self.is_occupied = true;
        self.vehicle_plate = Some(plate.into());
        self.entry_time = Some(entry_time);
    }

    /// Clear the spot
    pub fn release(&mut self) {
        self.is_occupied = false;
        self.vehicle_plate = None;
        self.entry_time = None;
    }

    /// Whether occupancy, plate and entry time agree with each other.
    pub fn is_consistent(&self) -> bool {
        self.is_occupied == self.vehicle_plate.is_some()
            && self.is_occupied == self.entry_time.is_some()
    }
}

/// Accepts any JSON number and truncates it to whole milliseconds.
///
/// Some writers store fractional timestamps (`now - random * 3600000`);
/// those still load, and are written back as integers.
fn deserialize_entry_time<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    // 2^63: first value past i64::MAX that f64 represents exactly
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    let raw: Option<f64> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(millis) if millis.is_finite() && (-LIMIT..LIMIT).contains(&millis) => {
            Ok(Some(millis.trunc() as i64))
        }
        Some(millis) => Err(serde::de::Error::custom(format!(
            "entryTime {millis} is outside the millisecond timestamp range"
        ))),
    }
}

/// Generate a random plate in the `LL NNNNN` format, e.g. `KR 54321`.
pub fn generate_plate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut plate = String::with_capacity(8);
    for _ in 0..2 {
        plate.push(PLATE_LETTERS[rng.gen_range(0..PLATE_LETTERS.len())] as char);
    }
    plate.push(' ');
    for _ in 0..5 {
        plate.push(PLATE_DIGITS[rng.gen_range(0..PLATE_DIGITS.len())] as char);
    }
    plate
}

/// Check a plate against `^[A-Z]{2} [0-9]{5}$`.
pub fn is_valid_plate(plate: &str) -> bool {
    let bytes = plate.as_bytes();
    bytes.len() == 8
        && bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2] == b' '
        && bytes[3..].iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generated_plates_are_valid() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let plate = generate_plate(&mut rng);
            assert!(is_valid_plate(&plate), "bad plate {plate:?}");
        }
    }

    #[test]
    fn test_plate_validation() {
        assert!(is_valid_plate("KR 54321"));
        assert!(!is_valid_plate("kr 54321"));
        assert!(!is_valid_plate("KR54321"));
        assert!(!is_valid_plate("KR 5432A"));
        assert!(!is_valid_plate("KRA 54321"));
        assert!(!is_valid_plate(""));
    }

    #[test]
    fn test_occupy_and_release_keep_fields_in_step() {
        let mut spot = Spot::free(3);
        assert!(spot.is_consistent());

        spot.occupy("WA 12345", 1_000);
        assert!(spot.is_occupied);
        assert_eq!(spot.vehicle_plate.as_deref(), Some("WA 12345"));
        assert_eq!(spot.entry_time, Some(1_000));
        assert!(spot.is_consistent());

        spot.release();
        assert_eq!(spot, Spot::free(3));
    }

    #[test]
    fn test_serializes_with_blob_field_names() {
        let json = serde_json::to_string(&Spot::occupied(1, "KR 54321", 1734000000000)).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"isOccupied":true,"vehiclePlate":"KR 54321","entryTime":1734000000000}"#
        );

        let json = serde_json::to_string(&Spot::free(2)).unwrap();
        assert_eq!(
            json,
            r#"{"id":2,"isOccupied":false,"vehiclePlate":null,"entryTime":null}"#
        );
    }

    #[test]
    fn test_fractional_entry_time_is_truncated() {
        let spot: Spot = serde_json::from_str(
            r#"{"id":9,"isOccupied":true,"vehiclePlate":"GD 00042","entryTime":1734000000123.987}"#,
        )
        .unwrap();
        assert_eq!(spot.entry_time, Some(1734000000123));
    }

    #[test]
    fn test_out_of_range_entry_time_is_rejected() {
        for raw in ["-1e300", "1e19", "9223372036854775808"] {
            let json = format!(
                r#"{{"id":1,"isOccupied":true,"vehiclePlate":"GD 00042","entryTime":{raw}}}"#
            );
            let err = serde_json::from_str::<Spot>(&json).unwrap_err();
            assert!(err.to_string().contains("entryTime"), "{raw}: {err}");
        }
    }

    #[test]
    fn test_inconsistent_spot_detected() {
        let spot = Spot {
            id: 1,
            is_occupied: true,
            vehicle_plate: None,
            entry_time: Some(5),
        };
        assert!(!spot.is_consistent());
    }
}
