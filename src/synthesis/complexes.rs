//! P-wave, QRS complex and T-wave synthesizers
//! Location: src/synthesis/complexes.rs

use super::primitives::{gaussian_pulse, triangular_pulse, Sample};
use crate::config::constants::{qrs, waves};
use crate::config::QrsShape;

/// Resolved geometry of one QRS sub-pulse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubPulse {
    pub offset_frac: f64,
    pub width_frac: f64,
    pub amp_mul: f64,
}

/// Q, R and S geometry with every default filled in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrsGeometry {
    pub q: SubPulse,
    pub r: SubPulse,
    pub s: SubPulse,
}

impl Default for QrsGeometry {
    fn default() -> Self {
        Self::resolve(None)
    }
}

impl QrsGeometry {
    /// Fill absent overrides with the standard Q/R/S fractions
    pub fn resolve(shape: Option<&QrsShape>) -> Self {
        let pick = |get: fn(&QrsShape) -> Option<f64>, fallback: f64| {
            shape.and_then(get).unwrap_or(fallback)
        };

        Self {
            q: SubPulse {
                offset_frac: pick(|s| s.q_offset_frac, qrs::Q_OFFSET_FRAC),
                width_frac: pick(|s| s.q_width_frac, qrs::Q_WIDTH_FRAC),
                amp_mul: pick(|s| s.q_amp_mul, qrs::Q_AMP_MUL),
            },
            r: SubPulse {
                offset_frac: pick(|s| s.r_offset_frac, qrs::R_OFFSET_FRAC),
                width_frac: pick(|s| s.r_width_frac, qrs::R_WIDTH_FRAC),
                amp_mul: pick(|s| s.r_amp_mul, qrs::R_AMP_MUL),
            },
            s: SubPulse {
                offset_frac: pick(|s| s.s_offset_frac, qrs::S_OFFSET_FRAC),
                width_frac: pick(|s| s.s_width_frac, qrs::S_WIDTH_FRAC),
                amp_mul: pick(|s| s.s_amp_mul, qrs::S_AMP_MUL),
            },
        }
    }

    /// Same geometry with the S multiplier raised by `delta`
    pub fn with_s_boost(mut self, delta: f64) -> Self {
        self.s.amp_mul += delta;
        self
    }
}

/// Gaussian P-wave, sigma = duration / 6
pub fn p_wave(center: f64, amplitude: f64, duration: f64, sampling_rate: f64) -> Vec<Sample> {
    let sigma = duration / waves::P_SIGMA_DIVISOR;
    gaussian_pulse(center, amplitude, sigma, duration, sampling_rate)
}

/// Gaussian T-wave, sigma = duration / 4
pub fn t_wave(center: f64, amplitude: f64, duration: f64, sampling_rate: f64) -> Vec<Sample> {
    let sigma = duration / waves::T_SIGMA_DIVISOR;
    gaussian_pulse(center, amplitude, sigma, duration, sampling_rate)
}

/// Three triangular sub-pulses placed around `center`, in time order.
///
/// `width` is the overall complex width the offset and width fractions
/// are taken of.
pub fn qrs_complex(
    center: f64,
    amplitude: f64,
    width: f64,
    geometry: &QrsGeometry,
    sampling_rate: f64,
) -> Vec<Sample> {
    let mut samples: Vec<Sample> = [geometry.q, geometry.r, geometry.s]
        .iter()
        .flat_map(|sub| {
            triangular_pulse(
                center + width * sub.offset_frac,
                amplitude * sub.amp_mul,
                width * sub.width_frac,
                sampling_rate,
            )
        })
        .collect();

    // Sub-pulses may overlap; overlay needs them chronological
    samples.sort_by(|a, b| a.time.total_cmp(&b.time));
    samples
}
