//! Unit conversion utilities
//!
//! Board coordinates are integer nanometres. Zone parameters are configured
//! in mils and converted on use.

/// Internal units per millimetre
pub const IU_PER_MM: i64 = 1_000_000;

/// Internal units per mil (1/1000 inch)
pub const IU_PER_MILS: i64 = 25_400;

/// Convert mils to internal units, rounding to the nearest unit
pub fn mils_to_iu(mils: f64) -> i64 {
    (mils * IU_PER_MILS as f64).round() as i64
}

/// Convert internal units to mils
pub fn iu_to_mils(iu: i64) -> f64 {
    iu as f64 / IU_PER_MILS as f64
}

/// Convert millimetres to internal units, rounding to the nearest unit
pub fn mm_to_iu(mm: f64) -> i64 {
    (mm * IU_PER_MM as f64).round() as i64
}
