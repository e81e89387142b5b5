//! Deterministic noise overlay
//! Location: src/synthesis/noise.rs
//!
//! Baseline wander is a slow sinusoid; white noise is Gaussian via the
//! Box-Muller transform. Each lead owns a generator seeded from the
//! configured seed and its lead index, so repeated synthesis is
//! reproducible and leads never share generator state.

use super::primitives::Sample;
use crate::config::NoiseConfig;
use crate::leads::Lead;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

pub struct NoiseModel {
    wander: BaselineWander,
    white: WhiteNoiseGenerator,
}

struct BaselineWander {
    amplitude: f64,
    frequency_hz: f64,
}

struct WhiteNoiseGenerator {
    std_dev: f64,
    rng: StdRng,
}

impl NoiseModel {
    pub fn for_lead(config: &NoiseConfig, lead: Lead) -> Self {
        Self {
            wander: BaselineWander {
                amplitude: config.baseline_wander_mv,
                frequency_hz: config.baseline_wander_hz,
            },
            white: WhiteNoiseGenerator {
                std_dev: config.white_noise_mv,
                rng: StdRng::seed_from_u64(config.seed ^ lead.index() as u64),
            },
        }
    }

    /// Noise value at time `t`; advances the white-noise generator
    pub fn next_value(&mut self, t: f64) -> f64 {
        self.wander.value_at(t) + self.white.generate_sample()
    }

    /// Add noise to every sample in order
    pub fn apply(&mut self, samples: &mut [Sample]) {
        for sample in samples.iter_mut() {
            sample.amplitude += self.next_value(sample.time);
        }
    }
}

impl BaselineWander {
    fn value_at(&self, t: f64) -> f64 {
        if self.amplitude == 0.0 {
            return 0.0;
        }
        self.amplitude * (2.0 * PI * self.frequency_hz * t).sin()
    }
}

impl WhiteNoiseGenerator {
    fn generate_sample(&mut self) -> f64 {
        if self.std_dev == 0.0 {
            return 0.0;
        }
        self.box_muller_transform() * self.std_dev
    }

    fn box_muller_transform(&mut self) -> f64 {
        // gen::<f64>() is in [0, 1); flip it so ln never sees 0
        let u1 = 1.0 - self.rng.gen::<f64>();
        let u2 = self.rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }
}
