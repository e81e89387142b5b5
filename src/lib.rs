//! ECG Synth: synthetic 12-lead electrocardiogram generation
//!
//! This library builds physiologically plausible 12-lead ECG traces from a
//! declarative configuration. It features:
//!
//! - Gaussian and triangular waveform primitives composed into P, QRS and T
//! - Hermite and sigmoid-arc ST-segment interpolation
//! - Per-lead amplitude projection with STEMI morphology switching
//! - A catalogue of nine clinical pathology presets
//! - Layered TOML and environment configuration
//! - JSON, CSV and FHIR-style observation export
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ecg_synth::{apply_pattern, synthesize, ClinicalPattern, ConfigPatch, Configuration, Lead};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let base = Configuration::new(ConfigPatch {
//!         duration: Some(5.0),
//!         ..Default::default()
//!     })?;
//!     let config = apply_pattern(&base, ClinicalPattern::StemiAnterior)?;
//!
//!     let output = synthesize(&config)?;
//!     if let Some(v3) = output.lead(Lead::V3) {
//!         println!("V3: {} samples", v3.samples.len());
//!     }
//!
//!     let csv = ecg_synth::export::to_csv(&output);
//!     println!("{}", csv.lines().next().unwrap_or_default());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod export;
pub mod leads;
pub mod patterns;
pub mod synthesis;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{
    ConfigLoader, ConfigPatch, Configuration, NoiseConfig, QrsShape, StSegmentMap, WaveShape,
    WaveformSpec,
};
pub use error::{EcgError, EcgResult};
pub use leads::{leads_in_region, AnatomicalRegion, Lead, LIMB_LEADS, PRECORDIAL_LEADS};
pub use patterns::{apply_pattern, apply_pattern_named, describe, preset, ClinicalPattern, PathologyPreset};
pub use synthesis::{synthesize, LeadTrace, MultiLeadOutput, Sample, Synthesizer};

pub use utils::{
    time::{current_timestamp_millis, TimeProvider},
    validation::{ValidationError, ValidationResult},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: "Synthetic 12-lead ECG signal synthesis engine".to_string(),
        features: vec![
            "Waveform primitives and complex synthesizers".to_string(),
            "Hermite and sigmoid-arc ST segments".to_string(),
            "Clinical pathology presets".to_string(),
            "Layered configuration management".to_string(),
            "JSON, CSV and observation export".to_string(),
        ],
    }
}

/// Library version information
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Library name
    pub name: String,
    /// Version string
    pub version: String,
    /// Description
    pub description: String,
    /// List of features
    pub features: Vec<String>,
}
