// src/leads.rs
//! The 12 standard leads and their projection data
//!
//! Each lead carries an amplitude multiplier approximating its relative signal
//! strength, a 3D orientation vector and an anatomical region. Only the
//! multiplier enters the amplitude math; the vector is stored for lookup and
//! reserved for a vector-projection model.

use crate::error::{EcgError, EcgErrorBuilder};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the 12 standard ECG leads, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lead {
    I,
    II,
    III,
    AVR,
    AVL,
    AVF,
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
}

/// Limb leads in canonical order
pub const LIMB_LEADS: [Lead; 6] = [Lead::I, Lead::II, Lead::III, Lead::AVR, Lead::AVL, Lead::AVF];

/// Precordial (chest) leads in canonical order
pub const PRECORDIAL_LEADS: [Lead; 6] = [Lead::V1, Lead::V2, Lead::V3, Lead::V4, Lead::V5, Lead::V6];

/// Heart region a lead looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnatomicalRegion {
    Inferior,
    Lateral,
    Anterior,
    Septal,
    Right,
}

/// Orientation of a lead's axis (informational)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Static projection data for one lead
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadProfile {
    pub amplitude_multiplier: f64,
    pub vector: LeadVector,
    pub region: AnatomicalRegion,
}

const fn profile(amplitude_multiplier: f64, x: f64, y: f64, z: f64, region: AnatomicalRegion) -> LeadProfile {
    LeadProfile {
        amplitude_multiplier,
        vector: LeadVector { x, y, z },
        region,
    }
}

use AnatomicalRegion::{Anterior, Inferior, Lateral, Right, Septal};

// Indexed by `Lead as usize`
const PROFILES: [LeadProfile; 12] = [
    profile(1.0, 1.0, 0.0, 0.0, Lateral),
    profile(1.2, 0.5, -0.866, 0.0, Inferior),
    profile(0.8, -0.5, -0.866, 0.0, Inferior),
    profile(-0.5, -0.866, 0.5, 0.0, Right),
    profile(0.6, 0.866, 0.5, 0.0, Lateral),
    profile(0.9, 0.0, -1.0, 0.0, Inferior),
    profile(0.4, 0.1, 0.0, -0.9, Septal),
    profile(0.8, 0.3, 0.0, -0.8, Septal),
    profile(1.3, 0.5, 0.0, -0.5, Anterior),
    profile(1.5, 0.7, 0.0, 0.0, Anterior),
    profile(1.2, 0.8, 0.2, 0.3, Lateral),
    profile(0.9, 0.9, 0.4, 0.2, Lateral),
];

impl Lead {
    /// All 12 leads in canonical order
    pub const ALL: [Lead; 12] = [
        Lead::I,
        Lead::II,
        Lead::III,
        Lead::AVR,
        Lead::AVL,
        Lead::AVF,
        Lead::V1,
        Lead::V2,
        Lead::V3,
        Lead::V4,
        Lead::V5,
        Lead::V6,
    ];

    /// Canonical clinical spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Lead::I => "I",
            Lead::II => "II",
            Lead::III => "III",
            Lead::AVR => "aVR",
            Lead::AVL => "aVL",
            Lead::AVF => "aVF",
            Lead::V1 => "V1",
            Lead::V2 => "V2",
            Lead::V3 => "V3",
            Lead::V4 => "V4",
            Lead::V5 => "V5",
            Lead::V6 => "V6",
        }
    }

    /// Position in canonical order
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn profile(&self) -> &'static LeadProfile {
        &PROFILES[self.index()]
    }

    pub fn amplitude_multiplier(&self) -> f64 {
        self.profile().amplitude_multiplier
    }

    pub fn vector(&self) -> LeadVector {
        self.profile().vector
    }

    pub fn region(&self) -> AnatomicalRegion {
        self.profile().region
    }

    pub fn is_limb(&self) -> bool {
        LIMB_LEADS.contains(self)
    }

    pub fn is_precordial(&self) -> bool {
        PRECORDIAL_LEADS.contains(self)
    }
}

/// Leads facing `region`, in canonical order
pub fn leads_in_region(region: AnatomicalRegion) -> Vec<Lead> {
    Lead::ALL
        .iter()
        .copied()
        .filter(|lead| lead.region() == region)
        .collect()
}

impl fmt::Display for Lead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AnatomicalRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnatomicalRegion::Inferior => "inferior",
            AnatomicalRegion::Lateral => "lateral",
            AnatomicalRegion::Anterior => "anterior",
            AnatomicalRegion::Septal => "septal",
            AnatomicalRegion::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Lead {
    type Err = EcgError;

    /// Case-insensitive, so "AVR" and "avr" resolve to aVR
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Lead::ALL
            .iter()
            .copied()
            .find(|lead| lead.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EcgErrorBuilder::new("leads", "parse_lead").unknown_lead(s))
    }
}

// Leads serialize as their clinical spelling so they work as map keys in
// JSON and TOML alike.
impl Serialize for Lead {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Lead {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LeadVisitor;

        impl serde::de::Visitor<'_> for LeadVisitor {
            type Value = Lead;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a standard ECG lead name such as \"II\" or \"aVF\"")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Lead, E> {
                v.parse().map_err(|err: EcgError| E::custom(err.to_string()))
            }
        }

        deserializer.deserialize_str(LeadVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_index() {
        for (i, lead) in Lead::ALL.iter().enumerate() {
            assert_eq!(lead.index(), i);
        }
        assert_eq!(Lead::ALL.len(), 12);
    }

    #[test]
    fn test_amplitude_multipliers() {
        assert_eq!(Lead::I.amplitude_multiplier(), 1.0);
        assert_eq!(Lead::II.amplitude_multiplier(), 1.2);
        assert_eq!(Lead::AVR.amplitude_multiplier(), -0.5);
        assert_eq!(Lead::V4.amplitude_multiplier(), 1.5);
        assert_eq!(Lead::V1.amplitude_multiplier(), 0.4);
    }

    #[test]
    fn test_regions() {
        assert_eq!(Lead::II.region(), AnatomicalRegion::Inferior);
        assert_eq!(Lead::AVR.region(), AnatomicalRegion::Right);
        assert_eq!(Lead::V2.region(), AnatomicalRegion::Septal);
        assert_eq!(
            leads_in_region(AnatomicalRegion::Inferior),
            vec![Lead::II, Lead::III, Lead::AVF]
        );
        assert_eq!(
            leads_in_region(AnatomicalRegion::Lateral),
            vec![Lead::I, Lead::AVL, Lead::V5, Lead::V6]
        );
    }

    #[test]
    fn test_vectors_are_stored() {
        let v = Lead::AVF.vector();
        assert_eq!((v.x, v.y, v.z), (0.0, -1.0, 0.0));
        let v = Lead::V1.vector();
        assert_eq!((v.x, v.y, v.z), (0.1, 0.0, -0.9));
    }

    #[test]
    fn test_limb_and_precordial_groups() {
        assert!(Lead::AVL.is_limb());
        assert!(!Lead::AVL.is_precordial());
        assert!(Lead::V6.is_precordial());
        assert_eq!([LIMB_LEADS, PRECORDIAL_LEADS].concat(), Lead::ALL.to_vec());
    }

    #[test]
    fn test_parse_round_trip() {
        for lead in Lead::ALL {
            assert_eq!(lead.as_str().parse::<Lead>().unwrap(), lead);
            assert_eq!(lead.to_string(), lead.as_str());
        }
        assert_eq!("avf".parse::<Lead>().unwrap(), Lead::AVF);
        assert_eq!(" V3 ".parse::<Lead>().unwrap(), Lead::V3);
    }

    #[test]
    fn test_unknown_lead_is_error() {
        let err = "V7".parse::<Lead>().unwrap_err();
        assert!(matches!(err, EcgError::UnknownLead { ref name, .. } if name == "V7"));
    }

    #[test]
    fn test_lead_serializes_as_clinical_name() {
        let json = serde_json::to_string(&Lead::AVR).unwrap();
        assert_eq!(json, "\"aVR\"");
        let lead: Lead = serde_json::from_str("\"V5\"").unwrap();
        assert_eq!(lead, Lead::V5);
        assert!(serde_json::from_str::<Lead>("\"V9\"").is_err());
    }
}
