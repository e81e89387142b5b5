//! Common utility functions for ECG Synth
//!
//! - Timestamp providers for stamping synthesis output
//! - Numeric field validation used by the configuration layer

pub mod time;
pub mod validation;

pub use time::{current_timestamp_millis, MockTimeProvider, SystemTimeProvider, TimeProvider};

pub use validation::{
    validate_count, validate_finite, validate_non_negative, validate_positive, ValidationError,
    ValidationResult,
};
