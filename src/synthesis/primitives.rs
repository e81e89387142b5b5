//! Waveform primitives
//! Location: src/synthesis/primitives.rs
//!
//! Both pulses emit `floor(duration * sampling_rate)` samples starting at
//! `center - duration / 2` with a fixed step of `1 / sampling_rate`.

use serde::{Deserialize, Serialize};

/// One point of a trace: seconds and millivolts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub amplitude: f64,
}

impl Sample {
    pub fn new(time: f64, amplitude: f64) -> Self {
        Self { time, amplitude }
    }
}

fn pulse_times(center: f64, duration: f64, sampling_rate: f64) -> impl Iterator<Item = f64> {
    let count = (duration * sampling_rate).floor().max(0.0) as usize;
    let start = center - duration / 2.0;
    (0..count).map(move |i| start + i as f64 / sampling_rate)
}

/// Gaussian bump `amplitude * exp(-(t - center)^2 / (2 sigma^2))`.
///
/// A non-positive `sigma` collapses the pulse to a spike: only a sample
/// landing exactly on `center` keeps the amplitude.
pub fn gaussian_pulse(
    center: f64,
    amplitude: f64,
    sigma: f64,
    duration: f64,
    sampling_rate: f64,
) -> Vec<Sample> {
    let two_sigma_sq = 2.0 * sigma * sigma;
    pulse_times(center, duration, sampling_rate)
        .map(|t| {
            let dt = t - center;
            let value = if two_sigma_sq > 0.0 {
                amplitude * (-(dt * dt) / two_sigma_sq).exp()
            } else if dt == 0.0 {
                amplitude
            } else {
                0.0
            };
            Sample::new(t, value)
        })
        .collect()
}

/// Symmetric triangle peaking at `center`, zero outside the half-width
pub fn triangular_pulse(center: f64, amplitude: f64, duration: f64, sampling_rate: f64) -> Vec<Sample> {
    let half_width = duration / 2.0;
    pulse_times(center, duration, sampling_rate)
        .map(|t| {
            let distance = (t - center).abs();
            let value = if half_width > 0.0 && distance <= half_width {
                amplitude * (1.0 - distance / half_width)
            } else {
                0.0
            };
            Sample::new(t, value)
        })
        .collect()
}
