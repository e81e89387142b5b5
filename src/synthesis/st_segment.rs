//! ST-segment interpolation between the J-point and T-wave onset
//! Location: src/synthesis/st_segment.rs
//!
//! Two models bridge `v0` (J-point) to `v_peak = v0 + elevation`:
//!
//! - [`StModel::Hermite`] is a cubic Hermite spline matching value and slope
//!   at both ends.
//! - [`StModel::SigmoidArc`] rises with a quintic smoothstep, holds a
//!   raised-cosine dome and falls back toward the T-wave onset.
//!
//! Both always return at least one sample.

use super::primitives::Sample;
use crate::config::constants::{signal, st};
use std::f64::consts::PI;

/// ST interpolation model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StModel {
    #[default]
    Hermite,
    SigmoidArc,
}

/// Shape parameters shared by both models
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StShape {
    pub model: StModel,
    /// Rise time used for the takeoff slope and the sigmoid rise (ms)
    pub takeoff_ms: f64,
    /// Sigmoid fall time (ms)
    pub fall_ms: f64,
    /// Dome convexity; positive values bulge upward
    pub curvature: f64,
    /// Damping applied to the takeoff slope
    pub alpha_takeoff: f64,
    /// Explicit end slope (mV/s) for the Hermite model
    pub end_slope: Option<f64>,
}

impl Default for StShape {
    fn default() -> Self {
        Self {
            model: StModel::Hermite,
            takeoff_ms: st::DEFAULT_TAKEOFF_MS,
            fall_ms: st::DEFAULT_FALL_MS,
            curvature: st::DEFAULT_CURVATURE,
            alpha_takeoff: st::DEFAULT_ALPHA_TAKEOFF,
            end_slope: None,
        }
    }
}

impl StShape {
    pub fn sigmoid_arc(curvature: f64, alpha_takeoff: f64) -> Self {
        Self {
            model: StModel::SigmoidArc,
            curvature,
            alpha_takeoff,
            ..Self::default()
        }
    }
}

/// Timing of the neighbouring Gaussian T-wave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TWaveContext {
    pub peak_time: f64,
    pub sigma: f64,
}

/// Optional neighbouring-wave values
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StContext {
    /// J-point value; 0 when absent
    pub j_point: Option<f64>,
    /// T-wave value at the window end; the sigmoid fall lands here and the
    /// Hermite end slope is scaled by it
    pub t_start: Option<f64>,
    pub t_wave: Option<TWaveContext>,
}

/// Quintic smoothstep `6w^5 - 15w^4 + 10w^3`
fn smoothstep(w: f64) -> f64 {
    w * w * w * (w * (w * 6.0 - 15.0) + 10.0)
}

/// Interpolate the ST window `[start, end]`
pub fn st_segment(
    start: f64,
    end: f64,
    elevation: f64,
    sampling_rate: f64,
    shape: &StShape,
    context: &StContext,
) -> Vec<Sample> {
    let duration = (end - start).max(0.0);
    let samples = ((duration * sampling_rate).floor() as usize).max(1);
    let span = duration.max(st::MIN_SPAN);

    let v0 = context.j_point.unwrap_or(0.0);
    let v_peak = v0 + elevation;

    let position = |i: usize| {
        if samples > 1 {
            i as f64 / (samples - 1) as f64
        } else {
            0.0
        }
    };
    let time_at = |i: usize| start + i as f64 / sampling_rate;

    match shape.model {
        StModel::Hermite => {
            let s0 = elevation / shape.takeoff_ms.max(1.0) * signal::MILLISECONDS_PER_SECOND
                * shape.alpha_takeoff;
            let s1 = shape.end_slope.unwrap_or_else(|| end_slope_from_t_wave(end, context));

            // Tangents in normalized-u units
            let m0 = s0 * span;
            let m1 = s1 * span;

            (0..samples)
                .map(|i| {
                    let u = position(i);
                    let u2 = u * u;
                    let u3 = u2 * u;
                    let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
                    let h10 = u3 - 2.0 * u2 + u;
                    let h01 = -2.0 * u3 + 3.0 * u2;
                    let h11 = u3 - u2;
                    Sample::new(time_at(i), h00 * v0 + h10 * m0 + h01 * v_peak + h11 * m1)
                })
                .collect()
        }
        StModel::SigmoidArc => {
            let rise = (shape.takeoff_ms / signal::MILLISECONDS_PER_SECOND / span)
                .min(st::MAX_PHASE_FRACTION);
            let fall = (shape.fall_ms / signal::MILLISECONDS_PER_SECOND / span)
                .min(st::MAX_PHASE_FRACTION);
            let mid_len = (1.0 - rise - fall).max(st::MIN_SPAN);
            let v_end = context.t_start.unwrap_or(v0);
            let dome_gain = 1.0 + st::DOME_CURVATURE_GAIN * shape.curvature;

            (0..samples)
                .map(|i| {
                    let u = position(i);
                    let value = if u <= rise && rise > 0.0 {
                        v0 + (v_peak - v0) * smoothstep(u / rise)
                    } else if u >= 1.0 - fall && fall > 0.0 {
                        let s = smoothstep((u - (1.0 - fall)) / fall);
                        v_peak * (1.0 - s) + v_end * s
                    } else {
                        let s = (u - rise) / mid_len;
                        let dome = (1.0 - (PI * s).cos()) / 2.0;
                        v0 + (v_peak - v0) * dome * dome_gain
                    };
                    Sample::new(time_at(i), value)
                })
                .collect()
        }
    }
}

/// Gaussian derivative of the T-wave at `end`, or 0 unless both the T-wave
/// timing and its onset value are known
fn end_slope_from_t_wave(end: f64, context: &StContext) -> f64 {
    match (context.t_wave, context.t_start) {
        (Some(t), Some(amplitude)) if t.sigma > 0.0 => {
            let dt = end - t.peak_time;
            let sigma_sq = t.sigma * t.sigma;
            amplitude * (-dt / sigma_sq) * (-(dt * dt) / (2.0 * sigma_sq)).exp()
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FS: f64 = 1000.0;

    #[test]
    fn test_hermite_endpoints() {
        let seg = st_segment(0.0, 0.125, 0.3, FS, &StShape::default(), &StContext::default());
        assert_eq!(seg.len(), 125);
        assert!(seg[0].amplitude.abs() < 1e-12);
        assert!((seg[seg.len() - 1].amplitude - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_hermite_respects_j_point() {
        let context = StContext {
            j_point: Some(-0.1),
            ..Default::default()
        };
        let seg = st_segment(0.0, 0.1, 0.2, FS, &StShape::default(), &context);
        assert!((seg[0].amplitude + 0.1).abs() < 1e-12);
        assert!((seg.last().unwrap().amplitude - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_zero_window_has_one_sample() {
        for shape in [StShape::default(), StShape::sigmoid_arc(0.8, 0.9)] {
            let seg = st_segment(0.5, 0.5, 0.3, FS, &shape, &StContext::default());
            assert_eq!(seg.len(), 1);
            assert_eq!(seg[0].time, 0.5);
        }
        // inverted window clamps to zero length
        let seg = st_segment(0.5, 0.4, 0.3, FS, &StShape::default(), &StContext::default());
        assert_eq!(seg.len(), 1);
    }

    #[test]
    fn test_flat_without_elevation() {
        let seg = st_segment(0.0, 0.1, 0.0, FS, &StShape::default(), &StContext::default());
        assert!(seg.iter().all(|s| s.amplitude.abs() < 1e-12));
    }

    #[test]
    fn test_explicit_end_slope_bends_segment() {
        let shape = StShape {
            end_slope: Some(-5.0),
            ..StShape::default()
        };
        let plain = st_segment(0.0, 0.1, 0.2, FS, &StShape::default(), &StContext::default());
        let bent = st_segment(0.0, 0.1, 0.2, FS, &shape, &StContext::default());
        let mid = plain.len() / 2;
        assert!(bent[mid].amplitude > plain[mid].amplitude);
        assert!((bent.last().unwrap().amplitude - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_t_wave_context_sets_end_slope() {
        let context = StContext {
            t_wave: Some(TWaveContext {
                peak_time: 0.2,
                sigma: 0.04,
            }),
            t_start: Some(0.3),
            ..Default::default()
        };
        // window ends before the T peak, so the T-wave is still rising
        assert!(end_slope_from_t_wave(0.12, &context) > 0.0);

        let timing_only = StContext {
            t_start: None,
            ..context
        };
        assert_eq!(end_slope_from_t_wave(0.12, &timing_only), 0.0);
    }

    #[test]
    fn test_sigmoid_arc_rises_and_returns() {
        let shape = StShape::sigmoid_arc(0.8, 0.9);
        let seg = st_segment(0.0, 0.2, 0.4, FS, &shape, &StContext::default());
        assert_eq!(seg.len(), 200);
        assert!(seg[0].amplitude.abs() < 1e-12);
        // fall phase lands back on v0 without a T-wave context
        assert!(seg.last().unwrap().amplitude.abs() < 1e-9);
        let max = seg.iter().map(|s| s.amplitude).fold(f64::MIN, f64::max);
        assert!(max > 0.4);
    }

    #[test]
    fn test_sigmoid_arc_lands_on_t_start() {
        let context = StContext {
            t_start: Some(0.25),
            ..Default::default()
        };
        let seg = st_segment(0.0, 0.2, 0.4, FS, &StShape::sigmoid_arc(0.8, 0.9), &context);
        assert!((seg.last().unwrap().amplitude - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_sigmoid_arc_phases_clamp_on_short_window() {
        // 30 ms rise and fall in a 40 ms window: both clamp to 45%
        let shape = StShape::sigmoid_arc(0.8, 0.9);
        let seg = st_segment(0.0, 0.04, 0.4, FS, &shape, &StContext::default());
        assert_eq!(seg.len(), 40);
        assert!(seg[0].amplitude.abs() < 1e-12);

        // u = 17/39 ≈ 0.436, almost through a 0.45 rise; an unclamped
        // 0.75 rise would still be near 0.25 here
        assert!((seg[17].amplitude - 0.4).abs() < 1e-3);

        // dome between u = 0.45 and 0.55, bounded by the curvature gain
        let (peak_index, peak) = seg
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.amplitude))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        assert!((18..=21).contains(&peak_index), "{peak_index}");
        assert!(peak > 0.4 && peak <= 0.4 * 1.28 + 1e-12);

        // fall starts at u = 0.55 from v_peak and lands on v0
        assert!(seg[23].amplitude > 0.39);
        assert!(seg.last().unwrap().amplitude.abs() < 1e-9);
    }

    #[test]
    fn test_smoothstep_bounds() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert!((smoothstep(1.0) - 1.0).abs() < 1e-12);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-12);
    }
}
