//! Clinical pattern catalogue
//!
//! Nine fixed pathology presets, each a partial configuration plus a
//! description. Presets are applied through [`Configuration::merge`], so the
//! ST map merges key by key like every other merge path.

use crate::config::{ConfigPatch, Configuration, QrsShape, StSegmentMap, WaveShape, WaveformSpec};
use crate::error::{EcgError, EcgErrorBuilder, EcgResult};
use crate::leads::Lead::{self, *};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClinicalPattern {
    Normal,
    StemiAnterior,
    StemiInferior,
    StemiLateral,
    Nstemi,
    Pericarditis,
    Lvh,
    Rbbb,
    Lbbb,
}

/// A preset's overrides and its description
#[derive(Debug, Clone, PartialEq)]
pub struct PathologyPreset {
    pub pattern: ClinicalPattern,
    pub description: &'static str,
    pub overrides: ConfigPatch,
}

impl ClinicalPattern {
    pub const ALL: [ClinicalPattern; 9] = [
        ClinicalPattern::Normal,
        ClinicalPattern::StemiAnterior,
        ClinicalPattern::StemiInferior,
        ClinicalPattern::StemiLateral,
        ClinicalPattern::Nstemi,
        ClinicalPattern::Pericarditis,
        ClinicalPattern::Lvh,
        ClinicalPattern::Rbbb,
        ClinicalPattern::Lbbb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClinicalPattern::Normal => "normal",
            ClinicalPattern::StemiAnterior => "stemi-anterior",
            ClinicalPattern::StemiInferior => "stemi-inferior",
            ClinicalPattern::StemiLateral => "stemi-lateral",
            ClinicalPattern::Nstemi => "nstemi",
            ClinicalPattern::Pericarditis => "pericarditis",
            ClinicalPattern::Lvh => "lvh",
            ClinicalPattern::Rbbb => "rbbb",
            ClinicalPattern::Lbbb => "lbbb",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ClinicalPattern::Normal => "Normal sinus rhythm with typical PQRST morphology",
            ClinicalPattern::StemiAnterior => {
                "ST-elevation myocardial infarction affecting anterior wall (V1-V4)"
            }
            ClinicalPattern::StemiInferior => {
                "ST-elevation myocardial infarction affecting inferior wall (II, III, aVF)"
            }
            ClinicalPattern::StemiLateral => {
                "ST-elevation myocardial infarction affecting lateral wall (I, aVL, V5-V6)"
            }
            ClinicalPattern::Nstemi => "Non-ST elevation myocardial infarction with T-wave inversions",
            ClinicalPattern::Pericarditis => {
                "Acute pericarditis with widespread ST elevation and PR depression"
            }
            ClinicalPattern::Lvh => "Left ventricular hypertrophy with increased QRS amplitude",
            ClinicalPattern::Rbbb => "Right bundle branch block with widened QRS complex",
            ClinicalPattern::Lbbb => {
                "Left bundle branch block with widened QRS complex and T-wave inversions"
            }
        }
    }

    /// Overrides this preset applies
    pub fn overrides(&self) -> ConfigPatch {
        match self {
            ClinicalPattern::Normal => ConfigPatch {
                heart_rate: Some(75.0),
                st_segment: Some(StSegmentMap::default()),
                p_wave: Some(gaussian(0.2, 0.08)),
                qrs_complex: Some(triangular(1.0, 0.08)),
                t_wave: Some(gaussian(0.3, 0.16)),
                ..Default::default()
            },
            ClinicalPattern::StemiAnterior => ConfigPatch {
                heart_rate: Some(85.0),
                st_segment: Some(st_map(
                    &[(V1, 0.3), (V2, 0.4), (V3, 0.5), (V4, 0.4)],
                    &[(II, 0.1), (III, 0.1), (AVF, 0.1)],
                )),
                qrs_complex: Some(triangular(1.2, 0.08).with_qrs(s_wave(0.1))),
                t_wave: Some(gaussian(0.7, 0.20)),
                ..Default::default()
            },
            ClinicalPattern::StemiInferior => ConfigPatch {
                heart_rate: Some(65.0),
                st_segment: Some(st_map(
                    &[(II, 0.4), (III, 0.5), (AVF, 0.4)],
                    &[(I, 0.1), (AVL, 0.15), (V2, 0.1)],
                )),
                qrs_complex: Some(triangular(1.1, 0.08).with_qrs(s_wave(0.05))),
                t_wave: Some(gaussian(0.6, 0.17)),
                ..Default::default()
            },
            ClinicalPattern::StemiLateral => ConfigPatch {
                heart_rate: Some(90.0),
                st_segment: Some(st_map(
                    &[(I, 0.3), (AVL, 0.4), (V5, 0.4), (V6, 0.3)],
                    &[(II, 0.1), (III, 0.1), (AVF, 0.1)],
                )),
                qrs_complex: Some(triangular(1.3, 0.08).with_qrs(s_wave(0.1))),
                t_wave: Some(gaussian(0.6, 0.16)),
                ..Default::default()
            },
            ClinicalPattern::Nstemi => ConfigPatch {
                heart_rate: Some(88.0),
                st_segment: Some(st_map(&[], &[(V4, 0.2), (V5, 0.2), (V6, 0.15)])),
                qrs_complex: Some(triangular(1.0, 0.08)),
                t_wave: Some(gaussian(-0.2, 0.16)),
                ..Default::default()
            },
            ClinicalPattern::Pericarditis => ConfigPatch {
                heart_rate: Some(95.0),
                st_segment: Some(st_map(
                    &[
                        (I, 0.15),
                        (II, 0.2),
                        (III, 0.15),
                        (AVL, 0.1),
                        (AVF, 0.2),
                        (V2, 0.2),
                        (V3, 0.25),
                        (V4, 0.2),
                        (V5, 0.15),
                        (V6, 0.1),
                    ],
                    &[(AVR, 0.1)],
                )),
                pr_interval: Some(0.18),
                t_wave: Some(gaussian(0.25, 0.16)),
                ..Default::default()
            },
            ClinicalPattern::Lvh => ConfigPatch {
                heart_rate: Some(70.0),
                st_segment: Some(st_map(&[], &[(V5, 0.1), (V6, 0.1)])),
                qrs_complex: Some(triangular(1.8, 0.10)),
                t_wave: Some(gaussian(-0.3, 0.16)),
                ..Default::default()
            },
            ClinicalPattern::Rbbb => ConfigPatch {
                heart_rate: Some(75.0),
                st_segment: Some(StSegmentMap::default()),
                qrs_complex: Some(triangular(1.0, 0.12)),
                t_wave: Some(gaussian(-0.2, 0.16)),
                ..Default::default()
            },
            ClinicalPattern::Lbbb => ConfigPatch {
                heart_rate: Some(75.0),
                st_segment: Some(StSegmentMap::default()),
                qrs_complex: Some(triangular(1.0, 0.14)),
                t_wave: Some(gaussian(-0.3, 0.16)),
                pr_interval: Some(0.18),
                ..Default::default()
            },
        }
    }

    pub fn preset(&self) -> PathologyPreset {
        PathologyPreset {
            pattern: *self,
            description: self.description(),
            overrides: self.overrides(),
        }
    }
}

fn gaussian(amplitude: f64, duration: f64) -> WaveformSpec {
    WaveformSpec::new(amplitude, duration, WaveShape::Gaussian)
}

fn triangular(amplitude: f64, duration: f64) -> WaveformSpec {
    WaveformSpec::new(amplitude, duration, WaveShape::Triangular)
}

fn s_wave(amp_mul: f64) -> QrsShape {
    QrsShape {
        s_amp_mul: Some(amp_mul),
        ..Default::default()
    }
}

fn st_map(elevation: &[(Lead, f64)], depression: &[(Lead, f64)]) -> StSegmentMap {
    StSegmentMap {
        elevation: elevation.iter().copied().collect(),
        depression: depression.iter().copied().collect(),
    }
}

impl fmt::Display for ClinicalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClinicalPattern {
    type Err = EcgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ClinicalPattern::ALL
            .iter()
            .copied()
            .find(|pattern| pattern.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EcgErrorBuilder::new("patterns", "parse_pattern").unknown_pattern(s))
    }
}

/// Resolve a preset by name
pub fn preset(name: &str) -> EcgResult<PathologyPreset> {
    Ok(name.parse::<ClinicalPattern>()?.preset())
}

/// Description for a preset
pub fn describe(pattern: ClinicalPattern) -> &'static str {
    pattern.description()
}

/// New configuration with the preset merged over `base`
pub fn apply_pattern(base: &Configuration, pattern: ClinicalPattern) -> EcgResult<Configuration> {
    let applied = base.merge(&pattern.overrides())?;
    tracing::info!(pattern = %pattern, revision = applied.revision, "clinical pattern applied");
    Ok(applied)
}

pub fn apply_pattern_named(base: &Configuration, name: &str) -> EcgResult<Configuration> {
    apply_pattern(base, name.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for pattern in ClinicalPattern::ALL {
            assert_eq!(pattern.as_str().parse::<ClinicalPattern>().unwrap(), pattern);
            assert_eq!(pattern.to_string(), pattern.as_str());
        }
        assert_eq!("STEMI-Anterior".parse::<ClinicalPattern>().unwrap(), ClinicalPattern::StemiAnterior);
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ClinicalPattern::StemiInferior).unwrap();
        assert_eq!(json, "\"stemi-inferior\"");
    }

    #[test]
    fn test_unknown_pattern() {
        let err = preset("flutter").unwrap_err();
        assert!(matches!(err, EcgError::UnknownPattern { ref name, .. } if name == "flutter"));
    }

    #[test]
    fn test_every_preset_is_valid() {
        for pattern in ClinicalPattern::ALL {
            let config = apply_pattern(&Configuration::default(), pattern).unwrap();
            assert!(config.validate().is_ok(), "{pattern}");
            assert!(!describe(pattern).is_empty());
        }
    }

    #[test]
    fn test_stemi_anterior_values() {
        let preset = preset("stemi-anterior").unwrap();
        assert_eq!(preset.pattern, ClinicalPattern::StemiAnterior);
        assert_eq!(
            preset.description,
            "ST-elevation myocardial infarction affecting anterior wall (V1-V4)"
        );

        let overrides = preset.overrides;
        assert_eq!(overrides.heart_rate, Some(85.0));
        let st = overrides.st_segment.unwrap();
        assert_eq!(st.elevation(V3), 0.5);
        assert_eq!(st.depression(AVF), 0.1);
        let qrs = overrides.qrs_complex.unwrap();
        assert_eq!(qrs.amplitude, 1.2);
        assert_eq!(qrs.qrs.unwrap().s_amp_mul, Some(0.1));
        assert_eq!(overrides.t_wave.unwrap().amplitude, 0.7);
    }

    #[test]
    fn test_stemi_presets_meet_thresholds() {
        for pattern in [
            ClinicalPattern::StemiAnterior,
            ClinicalPattern::StemiInferior,
            ClinicalPattern::StemiLateral,
        ] {
            let overrides = pattern.overrides();
            let s_amp_mul = overrides.qrs_complex.and_then(|q| q.qrs).and_then(|q| q.s_amp_mul);
            assert!(s_amp_mul.unwrap() > 0.0);
            assert!(overrides.t_wave.unwrap().amplitude > 0.5);
        }
    }

    #[test]
    fn test_apply_pattern_keeps_unrelated_fields() {
        let base = Configuration::new(ConfigPatch {
            duration: Some(4.0),
            sampling_rate: Some(500.0),
            ..Default::default()
        })
        .unwrap();
        let applied = apply_pattern_named(&base, "lbbb").unwrap();

        assert_eq!(applied.duration, 4.0);
        assert_eq!(applied.sampling_rate, 500.0);
        assert_eq!(applied.pr_interval, 0.18);
        assert_eq!(applied.qrs_complex.duration, 0.14);
        assert_eq!(applied.revision, base.revision + 1);
    }

    #[test]
    fn test_apply_pattern_merges_st_keys() {
        let base = Configuration::default()
            .with_st_segment(StSegmentMap::default().with_elevation(V6, 0.05))
            .unwrap();
        let applied = apply_pattern(&base, ClinicalPattern::StemiInferior).unwrap();

        assert_eq!(applied.st_segment.elevation(V6), 0.05);
        assert_eq!(applied.st_segment.elevation(III), 0.5);
        assert_eq!(applied.st_segment.depression(AVL), 0.15);
    }
}
