// src/config/constants.rs
//! Clinical, timing and morphology constants
//!
//! Defaults describe a normal sinus rhythm at 75 bpm sampled at 1 kHz.

/// Signal acquisition defaults
pub mod signal {
    pub const DEFAULT_HEART_RATE_BPM: f64 = 75.0;
    pub const DEFAULT_DURATION_S: f64 = 10.0;
    pub const DEFAULT_SAMPLING_RATE_HZ: f64 = 1000.0;
    pub const DEFAULT_AMPLITUDE: f64 = 1.0;
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    pub const MILLISECONDS_PER_SECOND: f64 = 1000.0;
}

/// Default wave shapes (mV, seconds)
pub mod waves {
    pub const P_AMPLITUDE_MV: f64 = 0.2;
    pub const P_DURATION_S: f64 = 0.08;
    pub const QRS_AMPLITUDE_MV: f64 = 1.0;
    pub const QRS_DURATION_S: f64 = 0.08;
    pub const T_AMPLITUDE_MV: f64 = 0.3;
    pub const T_DURATION_S: f64 = 0.16;

    /// Gaussian sigma as a fraction of wave duration
    pub const P_SIGMA_DIVISOR: f64 = 6.0;
    pub const T_SIGMA_DIVISOR: f64 = 4.0;
}

/// Interval timing (seconds)
pub mod intervals {
    pub const PR_INTERVAL_S: f64 = 0.16;
    pub const QT_INTERVAL_S: f64 = 0.40;
    pub const QRS_WIDTH_S: f64 = 0.08;

    /// P-wave center offset from beat start
    pub const P_WAVE_OFFSET_S: f64 = 0.02;
}

/// QRS sub-component defaults (fractions of QRS duration / base amplitude)
pub mod qrs {
    pub const Q_OFFSET_FRAC: f64 = -0.3;
    pub const R_OFFSET_FRAC: f64 = 0.0;
    pub const S_OFFSET_FRAC: f64 = 0.3;

    pub const Q_WIDTH_FRAC: f64 = 0.2;
    pub const R_WIDTH_FRAC: f64 = 0.4;
    pub const S_WIDTH_FRAC: f64 = 0.2;

    pub const Q_AMP_MUL: f64 = -0.3;
    pub const R_AMP_MUL: f64 = 1.0;
    pub const S_AMP_MUL: f64 = -0.2;
}

/// ST segment shaping
pub mod st {
    pub const DEFAULT_TAKEOFF_MS: f64 = 30.0;
    pub const DEFAULT_FALL_MS: f64 = 30.0;
    pub const DEFAULT_CURVATURE: f64 = 0.6;
    pub const DEFAULT_ALPHA_TAKEOFF: f64 = 1.0;

    /// Largest share of the window either sigmoid phase may take
    pub const MAX_PHASE_FRACTION: f64 = 0.45;
    /// Dome gain per unit curvature
    pub const DOME_CURVATURE_GAIN: f64 = 0.35;
    /// Floor for window length and mid-phase length
    pub const MIN_SPAN: f64 = 1e-6;
}

/// STEMI morphology switching
pub mod stemi {
    /// Configured per-lead elevation (mV) above which STEMI morphology applies
    pub const ELEVATION_THRESHOLD_MV: f64 = 0.2;
    pub const S_WAVE_GAIN: f64 = 0.5;
    pub const T_WAVE_GAIN: f64 = 0.8;
    pub const CURVATURE: f64 = 0.8;
    pub const ALPHA_TAKEOFF: f64 = 0.9;
}

/// Noise overlay defaults
pub mod noise {
    pub const BASELINE_WANDER_HZ: f64 = 0.3;
    pub const DEFAULT_SEED: u64 = 0x5EED_EC61;
}

/// Configuration source locations
pub mod paths {
    pub const DEFAULT_CONFIG_FILE: &str = "ecg-synth.toml";
    pub const LOCAL_CONFIG_FILE: &str = "ecg-synth.local.toml";
    pub const ENV_PREFIX: &str = "ECG_";
    pub const ENV_NESTING_SEPARATOR: &str = "__";
    pub const PATTERN_KEY: &str = "pattern";
}
