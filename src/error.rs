// src/error.rs
//! Unified error handling for ECG Synth
//!
//! Every fallible operation in the crate returns [`EcgResult`]. Errors carry an
//! [`ErrorContext`] naming the component and operation that raised them, so a
//! failure surfacing from a layered configuration load or an export call can be
//! traced back to its origin without a backtrace.

use std::time::SystemTime;
use thiserror::Error;

/// Unified error type for the whole crate
#[derive(Debug, Clone, Error)]
pub enum EcgError {
    /// A configuration field holds a value the engine cannot synthesize from
    #[error("[CONFIG] Invalid '{field}': {reason} ({context})")]
    Configuration {
        field: String,
        reason: String,
        context: ErrorContext,
    },

    /// A lead identifier outside the 12 standard leads
    #[error("[LOOKUP] Unknown lead '{name}', expected one of: {valid} ({context})")]
    UnknownLead {
        name: String,
        valid: String,
        context: ErrorContext,
    },

    /// A pathology preset name outside the fixed catalogue
    #[error("[LOOKUP] Unknown clinical pattern '{name}', expected one of: {valid} ({context})")]
    UnknownPattern {
        name: String,
        valid: String,
        context: ErrorContext,
    },

    /// Encoding or decoding an export format failed
    #[error("[{format}] {reason} ({context})")]
    Serialization {
        format: ExportFormat,
        reason: String,
        context: ErrorContext,
    },

    /// A configuration source could not be read or parsed
    #[error("[SOURCE] Configuration source '{path}': {reason} ({context})")]
    ConfigSource {
        path: String,
        reason: String,
        context: ErrorContext,
    },
}

/// Export formats for error tagging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Observation,
    Toml,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Observation => write!(f, "OBSERVATION"),
            ExportFormat::Toml => write!(f, "TOML"),
        }
    }
}

/// Error context for debugging and analysis
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub timestamp: SystemTime,
    pub component: String,
    pub operation: String,
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.component, self.operation)
    }
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            timestamp: SystemTime::now(),
            component: component.to_string(),
            operation: operation.to_string(),
            file: None,
            line: None,
        }
    }

    /// Create error context with file and line information
    pub fn with_location(component: &str, operation: &str, file: &'static str, line: u32) -> Self {
        let mut context = Self::new(component, operation);
        context.file = Some(file);
        context.line = Some(line);
        context
    }
}

/// Macro for creating error context with file and line info
#[macro_export]
macro_rules! error_context {
    ($component:expr, $operation:expr) => {
        $crate::error::ErrorContext::with_location($component, $operation, file!(), line!())
    };
}

impl EcgError {
    /// Context attached to this error
    pub fn context(&self) -> &ErrorContext {
        match self {
            EcgError::Configuration { context, .. }
            | EcgError::UnknownLead { context, .. }
            | EcgError::UnknownPattern { context, .. }
            | EcgError::Serialization { context, .. }
            | EcgError::ConfigSource { context, .. } => context,
        }
    }

    /// True for lead or pattern lookup failures
    pub fn is_lookup(&self) -> bool {
        matches!(self, EcgError::UnknownLead { .. } | EcgError::UnknownPattern { .. })
    }
}

/// Result type alias for ECG operations
pub type EcgResult<T> = Result<T, EcgError>;

/// Error builder for convenient error construction
pub struct EcgErrorBuilder {
    component: String,
    operation: String,
}

impl EcgErrorBuilder {
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
        }
    }

    fn context(&self) -> ErrorContext {
        ErrorContext::new(&self.component, &self.operation)
    }

    pub fn configuration(self, field: &str, reason: &str) -> EcgError {
        EcgError::Configuration {
            field: field.to_string(),
            reason: reason.to_string(),
            context: self.context(),
        }
    }

    pub fn unknown_lead(self, name: &str) -> EcgError {
        EcgError::UnknownLead {
            name: name.to_string(),
            valid: crate::leads::Lead::ALL
                .iter()
                .map(|lead| lead.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            context: self.context(),
        }
    }

    pub fn unknown_pattern(self, name: &str) -> EcgError {
        EcgError::UnknownPattern {
            name: name.to_string(),
            valid: crate::patterns::ClinicalPattern::ALL
                .iter()
                .map(|pattern| pattern.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            context: self.context(),
        }
    }

    pub fn serialization(self, format: ExportFormat, reason: &str) -> EcgError {
        EcgError::Serialization {
            format,
            reason: reason.to_string(),
            context: self.context(),
        }
    }

    pub fn config_source(self, path: &str, reason: &str) -> EcgError {
        EcgError::ConfigSource {
            path: path.to_string(),
            reason: reason.to_string(),
            context: self.context(),
        }
    }
}

/// Conversion from field validation failures
impl From<crate::utils::validation::ValidationError> for EcgError {
    fn from(err: crate::utils::validation::ValidationError) -> Self {
        EcgError::Configuration {
            field: err.field().to_string(),
            reason: err.to_string(),
            context: error_context!("config", "validate"),
        }
    }
}
