//! Export of synthesis output
//!
//! - [`json`]: pretty JSON with a validating importer
//! - [`csv`]: one time column plus one column per lead
//! - [`observation`]: FHIR-style clinical observation record

pub mod csv;
pub mod json;
pub mod observation;

pub use self::csv::to_csv;
pub use json::{from_json, to_json};
pub use observation::{snomed_code, to_observation};

/// Fixed-point formatting that never prints a negative zero
pub(crate) fn fixed(value: f64, decimals: usize) -> String {
    let formatted = format!("{value:.decimals$}");
    match formatted.strip_prefix('-') {
        Some(magnitude) if magnitude.bytes().all(|b| b == b'0' || b == b'.') => magnitude.to_string(),
        _ => formatted,
    }
}
