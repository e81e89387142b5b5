//! Validation utilities for configuration fields
//!
//! Synthesis divides by the sampling rate and the heart rate and sizes buffers
//! from durations, so every numeric field is checked here before a
//! [`crate::Configuration`] is accepted. NaN and infinities are rejected
//! up front rather than propagated into sample values.

use thiserror::Error;

/// Validation result type
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Field-level validation failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value must be strictly greater than zero
    #[error("Field '{field}' must be > 0, got {value}")]
    NotPositive { field: String, value: f64 },

    /// Value must be zero or greater
    #[error("Field '{field}' must be >= 0, got {value}")]
    Negative { field: String, value: f64 },

    /// NaN or infinite value
    #[error("Field '{field}' must be a finite number, got {value}")]
    NotFinite { field: String, value: f64 },

    /// A derived count no buffer could hold
    #[error("Field '{field}' implies {value} samples or beats, more than the limit of {max}")]
    TooLarge { field: String, value: f64, max: usize },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            ValidationError::NotPositive { field, .. }
            | ValidationError::Negative { field, .. }
            | ValidationError::NotFinite { field, .. }
            | ValidationError::TooLarge { field, .. } => field,
        }
    }
}

/// Reject NaN and infinities
pub fn validate_finite(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite {
            field: field.to_string(),
            value,
        })
    }
}

/// Require a finite value strictly above zero
pub fn validate_positive(field: &str, value: f64) -> ValidationResult<()> {
    validate_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive {
            field: field.to_string(),
            value,
        })
    }
}

/// Require a finite value of zero or more
pub fn validate_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    validate_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::Negative {
            field: field.to_string(),
            value,
        })
    }
}

/// Convert a derived count to `usize`, failing above `max` instead of
/// saturating
pub fn validate_count(field: &str, value: f64, max: usize) -> ValidationResult<usize> {
    validate_non_negative(field, value)?;
    if value <= max as f64 {
        Ok(value as usize)
    } else {
        Err(ValidationError::TooLarge {
            field: field.to_string(),
            value,
            max,
        })
    }
}
