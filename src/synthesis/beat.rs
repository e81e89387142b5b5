//! Single-beat composition
//! Location: src/synthesis/beat.rs
//!
//! A beat is a zero baseline of `floor(beat_duration * fs)` samples onto
//! which the P-wave, QRS complex, ST segment and T-wave are added. The
//! baseline stops just past the configured duration, so a slow rate never
//! builds samples the trace would throw away. Component
//! samples are matched to the baseline by quantized time; a sample further
//! than half a sampling period from its slot is dropped.

use super::complexes::{p_wave, qrs_complex, t_wave, QrsGeometry};
use super::primitives::Sample;
use super::st_segment::{st_segment, StContext, StShape};
use crate::config::constants::{intervals, stemi};
use crate::config::Configuration;
use crate::leads::Lead;

/// Per-lead morphology, chosen once from the configured ST elevation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Morphology {
    Normal,
    /// Convex ST, boosted S-wave and hyperacute T-wave
    Stemi { elevation: f64 },
}

impl Morphology {
    /// STEMI when the lead's configured elevation exceeds the threshold
    pub fn select(config: &Configuration, lead: Lead) -> Self {
        let elevation = config.st_segment.elevation(lead);
        if elevation > stemi::ELEVATION_THRESHOLD_MV {
            Morphology::Stemi { elevation }
        } else {
            Morphology::Normal
        }
    }

    pub fn is_stemi(&self) -> bool {
        matches!(self, Morphology::Stemi { .. })
    }

    fn qrs_geometry(&self, base: QrsGeometry) -> QrsGeometry {
        match *self {
            Morphology::Normal => base,
            Morphology::Stemi { elevation } => base.with_s_boost(stemi::S_WAVE_GAIN * elevation),
        }
    }

    /// Unscaled T amplitude for this morphology
    fn t_amplitude(&self, base: f64) -> f64 {
        match *self {
            Morphology::Normal => base,
            Morphology::Stemi { elevation } => base + stemi::T_WAVE_GAIN * elevation,
        }
    }

    fn st_shape(&self) -> StShape {
        match self {
            Morphology::Normal => StShape::default(),
            Morphology::Stemi { .. } => StShape::sigmoid_arc(stemi::CURVATURE, stemi::ALPHA_TAKEOFF),
        }
    }
}

/// Component placement relative to a beat start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatTiming {
    pub p_center: f64,
    pub qrs_center: f64,
    pub st_start: f64,
    pub st_end: f64,
    pub t_center: f64,
}

impl BeatTiming {
    pub fn new(config: &Configuration, start: f64) -> Self {
        let qrs_center = start + config.pr_interval;
        Self {
            p_center: start + intervals::P_WAVE_OFFSET_S,
            qrs_center,
            st_start: qrs_center + config.qrs_width / 2.0,
            st_end: start + config.qt_interval - config.t_wave.duration / 2.0,
            t_center: start + config.qt_interval,
        }
    }
}

/// Composes beats for one lead under a fixed configuration
#[derive(Debug, Clone)]
pub struct BeatComposer<'a> {
    config: &'a Configuration,
    lead: Lead,
    morphology: Morphology,
    geometry: QrsGeometry,
    /// Global amplitude times lead multiplier
    scale: f64,
}

impl<'a> BeatComposer<'a> {
    pub fn new(config: &'a Configuration, lead: Lead) -> Self {
        let morphology = Morphology::select(config, lead);
        let geometry = morphology.qrs_geometry(QrsGeometry::resolve(config.qrs_complex.qrs.as_ref()));

        tracing::trace!(lead = %lead, ?morphology, "beat morphology selected");

        Self {
            config,
            lead,
            morphology,
            geometry,
            scale: config.amplitude * lead.amplitude_multiplier(),
        }
    }

    pub fn lead(&self) -> Lead {
        self.lead
    }

    pub fn morphology(&self) -> Morphology {
        self.morphology
    }

    /// One cardiac cycle starting at `start`, time-ordered
    pub fn compose(&self, start: f64) -> Vec<Sample> {
        let config = self.config;
        let fs = config.sampling_rate;
        let timing = BeatTiming::new(config, start);

        let p = p_wave(
            timing.p_center,
            config.p_wave.amplitude * self.scale,
            config.p_wave.duration,
            fs,
        );
        let qrs = qrs_complex(
            timing.qrs_center,
            config.qrs_complex.amplitude * self.scale,
            config.qrs_complex.duration,
            &self.geometry,
            fs,
        );
        let st = st_segment(
            timing.st_start,
            timing.st_end,
            config.st_segment.net_offset(self.lead) * self.scale,
            fs,
            &self.morphology.st_shape(),
            &StContext::default(),
        );
        let t = t_wave(
            timing.t_center,
            self.morphology.t_amplitude(config.t_wave.amplitude) * self.scale,
            config.t_wave.duration,
            fs,
        );

        let mut beat = baseline(start, self.baseline_len(start), fs);
        let dropped: usize = [p, qrs, st, t]
            .iter()
            .map(|component| overlay(&mut beat, component, start, fs))
            .sum();

        if dropped > 0 {
            tracing::debug!(lead = %self.lead, start, dropped, "component samples outside beat baseline");
        }

        beat
    }

    /// Beat baseline length, cut where the trace clip would discard the rest
    fn baseline_len(&self, start: f64) -> usize {
        let config = self.config;
        let remaining = ((config.duration - start) * config.sampling_rate).floor();
        if remaining < 0.0 {
            return 0;
        }
        // One spare slot; the trace clip settles the exact boundary
        config.beat_samples().min(remaining as usize + 2)
    }
}

/// Zero samples at `start + i / fs`
fn baseline(start: f64, count: usize, fs: f64) -> Vec<Sample> {
    (0..count)
        .map(|i| Sample::new(start + i as f64 / fs, 0.0))
        .collect()
}

/// Add `component` onto `beat` by quantized index; returns the number of
/// samples that matched no baseline slot
fn overlay(beat: &mut [Sample], component: &[Sample], start: f64, fs: f64) -> usize {
    let tolerance = 0.5 / fs;
    let mut dropped = 0;

    for sample in component {
        let slot = ((sample.time - start) * fs).round();
        let target = if slot >= 0.0 { beat.get_mut(slot as usize) } else { None };

        match target {
            Some(point) if (point.time - sample.time).abs() < tolerance => {
                point.amplitude += sample.amplitude;
            }
            _ => dropped += 1,
        }
    }

    dropped
}
