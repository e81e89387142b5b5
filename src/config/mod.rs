// src/config/mod.rs
//! Synthesis configuration
//!
//! A [`Configuration`] is an immutable, versioned snapshot. Helpers never
//! mutate their receiver: [`Configuration::merge`] and
//! [`Configuration::with_st_segment`] return a new value whose `revision` is
//! one higher than the source.
//!
//! # Merge contract
//!
//! One contract applies to every merge path, including pathology presets:
//!
//! - scalar fields and whole [`WaveformSpec`] values present in a
//!   [`ConfigPatch`] replace the base field;
//! - the ST map merges key by key per sub-map, so offsets on leads the patch
//!   does not mention survive. Use [`Configuration::with_st_segment`] to
//!   replace the map wholesale.

pub mod constants;
pub mod loader;

pub use loader::ConfigLoader;

use crate::error::EcgResult;
use crate::leads::Lead;
use crate::synthesis::Sample;
use crate::utils::validation::{
    validate_count, validate_finite, validate_non_negative, validate_positive,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete synthesis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Beats per minute
    pub heart_rate: f64,
    /// Total trace length in seconds
    pub duration: f64,
    /// Samples per second
    pub sampling_rate: f64,
    /// Global amplitude scalar applied to every component
    pub amplitude: f64,
    pub p_wave: WaveformSpec,
    pub qrs_complex: WaveformSpec,
    pub t_wave: WaveformSpec,
    #[serde(default)]
    pub st_segment: StSegmentMap,
    /// Beat start to QRS center (s)
    pub pr_interval: f64,
    /// Beat start to T-wave center (s)
    pub qt_interval: f64,
    /// QRS width used to place the J-point (s)
    pub qrs_width: f64,
    #[serde(default)]
    pub noise: NoiseConfig,
    #[serde(default)]
    pub revision: u64,
}

/// Amplitude, duration and shape of one deflection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformSpec {
    /// Peak amplitude (mV)
    pub amplitude: f64,
    /// Support width (s)
    pub duration: f64,
    #[serde(default)]
    pub shape: WaveShape,
    /// Sub-pulse geometry, read for the QRS complex only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qrs: Option<QrsShape>,
}

/// Shape tag carried by a waveform spec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveShape {
    #[default]
    Gaussian,
    Triangular,
    Custom,
}

/// Optional Q/R/S geometry overrides; absent entries fall back to defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QrsShape {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q_offset_frac: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_offset_frac: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s_offset_frac: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q_width_frac: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_width_frac: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s_width_frac: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q_amp_mul: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_amp_mul: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s_amp_mul: Option<f64>,
}

/// Per-lead ST offsets in mV; a missing lead means 0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StSegmentMap {
    #[serde(default)]
    pub elevation: BTreeMap<Lead, f64>,
    #[serde(default)]
    pub depression: BTreeMap<Lead, f64>,
}

/// Additive noise overlay, disabled when both amplitudes are zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    #[serde(default)]
    pub baseline_wander_mv: f64,
    #[serde(default = "defaults::baseline_wander_hz")]
    pub baseline_wander_hz: f64,
    /// Standard deviation of white Gaussian noise (mV)
    #[serde(default)]
    pub white_noise_mv: f64,
    #[serde(default = "defaults::noise_seed")]
    pub seed: u64,
}

/// Partial configuration; every populated field overrides the base
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_wave: Option<WaveformSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qrs_complex: Option<WaveformSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t_wave: Option<WaveformSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub st_segment: Option<StSegmentMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_interval: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qt_interval: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qrs_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise: Option<NoiseConfig>,
}

/// Largest sample or beat count a configuration may imply; the most
/// samples one `Vec` can address
const MAX_COUNT: usize = isize::MAX as usize / std::mem::size_of::<Sample>();

/// Default value providers using constants
mod defaults {
    use crate::config::constants::*;

    pub fn baseline_wander_hz() -> f64 { noise::BASELINE_WANDER_HZ }
    pub fn noise_seed() -> u64 { noise::DEFAULT_SEED }
}

impl WaveformSpec {
    pub fn new(amplitude: f64, duration: f64, shape: WaveShape) -> Self {
        Self {
            amplitude,
            duration,
            shape,
            qrs: None,
        }
    }

    pub fn with_qrs(mut self, qrs: QrsShape) -> Self {
        self.qrs = Some(qrs);
        self
    }
}

impl StSegmentMap {
    /// Configured elevation for a lead
    pub fn elevation(&self, lead: Lead) -> f64 {
        self.elevation.get(&lead).copied().unwrap_or(0.0)
    }

    /// Configured depression for a lead
    pub fn depression(&self, lead: Lead) -> f64 {
        self.depression.get(&lead).copied().unwrap_or(0.0)
    }

    /// Elevation minus depression, before amplitude scaling
    pub fn net_offset(&self, lead: Lead) -> f64 {
        self.elevation(lead) - self.depression(lead)
    }

    pub fn with_elevation(mut self, lead: Lead, mv: f64) -> Self {
        self.elevation.insert(lead, mv);
        self
    }

    pub fn with_depression(mut self, lead: Lead, mv: f64) -> Self {
        self.depression.insert(lead, mv);
        self
    }

    /// Key-by-key merge; entries in `overlay` win
    pub fn merge_from(&mut self, overlay: &StSegmentMap) {
        self.elevation
            .extend(overlay.elevation.iter().map(|(lead, mv)| (*lead, *mv)));
        self.depression
            .extend(overlay.depression.iter().map(|(lead, mv)| (*lead, *mv)));
    }

    /// Build from lead names, failing on any unknown name
    pub fn from_named<'a, E, D>(elevation: E, depression: D) -> EcgResult<Self>
    where
        E: IntoIterator<Item = (&'a str, f64)>,
        D: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut map = StSegmentMap::default();
        for (name, mv) in elevation {
            map.elevation.insert(name.parse()?, mv);
        }
        for (name, mv) in depression {
            map.depression.insert(name.parse()?, mv);
        }
        Ok(map)
    }

    pub fn is_empty(&self) -> bool {
        self.elevation.is_empty() && self.depression.is_empty()
    }
}

impl NoiseConfig {
    pub fn is_enabled(&self) -> bool {
        self.baseline_wander_mv != 0.0 || self.white_noise_mv != 0.0
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            baseline_wander_mv: 0.0,
            baseline_wander_hz: defaults::baseline_wander_hz(),
            white_noise_mv: 0.0,
            seed: defaults::noise_seed(),
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        use constants::{intervals, signal, waves};

        Self {
            heart_rate: signal::DEFAULT_HEART_RATE_BPM,
            duration: signal::DEFAULT_DURATION_S,
            sampling_rate: signal::DEFAULT_SAMPLING_RATE_HZ,
            amplitude: signal::DEFAULT_AMPLITUDE,
            p_wave: WaveformSpec::new(waves::P_AMPLITUDE_MV, waves::P_DURATION_S, WaveShape::Gaussian),
            qrs_complex: WaveformSpec::new(
                waves::QRS_AMPLITUDE_MV,
                waves::QRS_DURATION_S,
                WaveShape::Triangular,
            ),
            t_wave: WaveformSpec::new(waves::T_AMPLITUDE_MV, waves::T_DURATION_S, WaveShape::Gaussian),
            st_segment: StSegmentMap::default(),
            pr_interval: intervals::PR_INTERVAL_S,
            qt_interval: intervals::QT_INTERVAL_S,
            qrs_width: intervals::QRS_WIDTH_S,
            noise: NoiseConfig::default(),
            revision: 0,
        }
    }
}

impl Configuration {
    /// Defaults overlaid with `overrides`, validated, at revision 0
    pub fn new(overrides: ConfigPatch) -> EcgResult<Self> {
        let config = Self::default().overlay(&overrides);
        config.validate()?;
        Ok(config)
    }

    /// New configuration with `patch` applied and the revision bumped
    pub fn merge(&self, patch: &ConfigPatch) -> EcgResult<Self> {
        let mut merged = self.overlay(patch);
        merged.revision = self.revision + 1;
        merged.validate()?;
        tracing::debug!(revision = merged.revision, "configuration merged");
        Ok(merged)
    }

    /// New configuration whose ST map is exactly `st_segment`
    pub fn with_st_segment(&self, st_segment: StSegmentMap) -> EcgResult<Self> {
        let mut replaced = self.clone();
        replaced.st_segment = st_segment;
        replaced.revision = self.revision + 1;
        replaced.validate()?;
        Ok(replaced)
    }

    fn overlay(&self, patch: &ConfigPatch) -> Self {
        let mut merged = self.clone();

        if let Some(v) = patch.heart_rate { merged.heart_rate = v; }
        if let Some(v) = patch.duration { merged.duration = v; }
        if let Some(v) = patch.sampling_rate { merged.sampling_rate = v; }
        if let Some(v) = patch.amplitude { merged.amplitude = v; }
        if let Some(v) = &patch.p_wave { merged.p_wave = v.clone(); }
        if let Some(v) = &patch.qrs_complex { merged.qrs_complex = v.clone(); }
        if let Some(v) = &patch.t_wave { merged.t_wave = v.clone(); }
        if let Some(v) = &patch.st_segment { merged.st_segment.merge_from(v); }
        if let Some(v) = patch.pr_interval { merged.pr_interval = v; }
        if let Some(v) = patch.qt_interval { merged.qt_interval = v; }
        if let Some(v) = patch.qrs_width { merged.qrs_width = v; }
        if let Some(v) = &patch.noise { merged.noise = v.clone(); }

        merged
    }

    /// Fail fast on values synthesis cannot use
    pub fn validate(&self) -> EcgResult<()> {
        validate_positive("heart_rate", self.heart_rate)?;
        validate_positive("sampling_rate", self.sampling_rate)?;
        validate_non_negative("duration", self.duration)?;
        validate_finite("amplitude", self.amplitude)?;

        for (name, wave) in [
            ("p_wave", &self.p_wave),
            ("qrs_complex", &self.qrs_complex),
            ("t_wave", &self.t_wave),
        ] {
            validate_finite(&format!("{name}.amplitude"), wave.amplitude)?;
            validate_non_negative(&format!("{name}.duration"), wave.duration)?;
        }
        if let Some(qrs) = &self.qrs_complex.qrs {
            for value in qrs.overrides() {
                validate_finite("qrs_complex.qrs", value)?;
            }
        }

        validate_non_negative("pr_interval", self.pr_interval)?;
        validate_non_negative("qt_interval", self.qt_interval)?;
        validate_non_negative("qrs_width", self.qrs_width)?;

        for (lead, mv) in self.st_segment.elevation.iter() {
            validate_finite(&format!("st_segment.elevation.{lead}"), *mv)?;
        }
        for (lead, mv) in self.st_segment.depression.iter() {
            validate_finite(&format!("st_segment.depression.{lead}"), *mv)?;
        }

        validate_non_negative("noise.baseline_wander_mv", self.noise.baseline_wander_mv)?;
        validate_non_negative("noise.baseline_wander_hz", self.noise.baseline_wander_hz)?;
        validate_non_negative("noise.white_noise_mv", self.noise.white_noise_mv)?;

        // Every count synthesis derives must convert without saturating
        validate_count("duration", (self.duration * self.sampling_rate).floor(), MAX_COUNT - 1)?;
        validate_count("heart_rate", (self.beat_duration() * self.sampling_rate).floor(), MAX_COUNT)?;
        validate_count("heart_rate", (self.duration / self.beat_duration()).ceil(), MAX_COUNT)?;

        Ok(())
    }

    /// Seconds per beat
    pub fn beat_duration(&self) -> f64 {
        constants::signal::SECONDS_PER_MINUTE / self.heart_rate
    }

    /// Seconds between samples
    pub fn sampling_period(&self) -> f64 {
        1.0 / self.sampling_rate
    }

    /// Baseline samples in one beat.
    ///
    /// The count conversions below are range-checked by [`validate`](Self::validate).
    pub fn beat_samples(&self) -> usize {
        (self.beat_duration() * self.sampling_rate).floor() as usize
    }

    /// `ceil(duration / beat_duration)`
    pub fn beat_count(&self) -> usize {
        (self.duration / self.beat_duration()).ceil() as usize
    }

    /// Samples at `i / fs` that fit in `[0, duration]`
    pub fn trace_samples(&self) -> usize {
        (self.duration * self.sampling_rate).floor() as usize + 1
    }
}

impl QrsShape {
    fn overrides(&self) -> impl Iterator<Item = f64> {
        [
            self.q_offset_frac,
            self.r_offset_frac,
            self.s_offset_frac,
            self.q_width_frac,
            self.r_width_frac,
            self.s_width_frac,
            self.q_amp_mul,
            self.r_amp_mul,
            self.s_amp_mul,
        ]
        .into_iter()
        .flatten()
    }
}
