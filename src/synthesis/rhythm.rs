//! Rhythm sequencing and multi-lead synthesis
//! Location: src/synthesis/rhythm.rs

use super::beat::BeatComposer;
use super::noise::NoiseModel;
use super::{LeadTrace, MultiLeadOutput};
use crate::config::Configuration;
use crate::error::EcgResult;
use crate::leads::Lead;
use crate::utils::time::{SystemTimeProvider, TimeProvider};
use rayon::prelude::*;

/// Synthesizes traces for a validated configuration
pub struct Synthesizer {
    config: Configuration,
    time_provider: Box<dyn TimeProvider>,
}

impl std::fmt::Debug for Synthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synthesizer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Synthesizer {
    /// Validates `config` up front so synthesis itself cannot fail
    pub fn new(config: Configuration) -> EcgResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            time_provider: Box::new(SystemTimeProvider),
        })
    }

    /// Replace the clock used to stamp outputs
    pub fn with_time_provider(mut self, time_provider: Box<dyn TimeProvider>) -> Self {
        self.time_provider = time_provider;
        self
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// `ceil(duration / beat_duration)`
    pub fn beat_count(&self) -> usize {
        self.config.beat_count()
    }

    /// Beats laid end to end for one lead, clipped to the duration
    pub fn synthesize_lead(&self, lead: Lead) -> LeadTrace {
        let config = &self.config;
        let composer = BeatComposer::new(config, lead);
        let beat_duration = config.beat_duration();
        // A beat shorter than one sample period has an empty baseline
        let beats = if config.beat_samples() == 0 { 0 } else { self.beat_count() };

        let mut samples = Vec::with_capacity(config.trace_samples());
        for i in 0..beats {
            samples.extend(composer.compose(i as f64 * beat_duration));
        }

        if config.noise.is_enabled() {
            NoiseModel::for_lead(&config.noise, lead).apply(&mut samples);
        }

        samples.retain(|sample| sample.time <= config.duration);

        LeadTrace { lead, samples }
    }

    /// All 12 leads in canonical order, stamped with the provider's clock
    pub fn synthesize(&self) -> MultiLeadOutput {
        tracing::debug!(
            leads = Lead::ALL.len(),
            beats = self.beat_count(),
            samples_per_beat = self.config.beat_samples(),
            revision = self.config.revision,
            "synthesizing"
        );

        let leads: Vec<LeadTrace> = Lead::ALL
            .par_iter()
            .map(|&lead| self.synthesize_lead(lead))
            .collect();

        MultiLeadOutput {
            leads,
            configuration: self.config.clone(),
            timestamp: self.time_provider.now_millis(),
        }
    }
}

/// Validate `config` and synthesize all 12 leads
pub fn synthesize(config: &Configuration) -> EcgResult<MultiLeadOutput> {
    Ok(Synthesizer::new(config.clone())?.synthesize())
}
