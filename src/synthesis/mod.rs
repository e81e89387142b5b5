//! Signal synthesis: primitives up to the 12-lead output
//!
//! Data flows configuration → [`rhythm::Synthesizer`] → [`beat::BeatComposer`]
//! → {P, QRS, ST, T} → per-lead [`LeadTrace`] → [`MultiLeadOutput`].

pub mod beat;
pub mod complexes;
pub mod noise;
pub mod primitives;
pub mod rhythm;
pub mod st_segment;

pub use beat::{BeatComposer, BeatTiming, Morphology};
pub use primitives::{gaussian_pulse, triangular_pulse, Sample};
pub use rhythm::{synthesize, Synthesizer};
pub use st_segment::{st_segment, StContext, StModel, StShape, TWaveContext};

use crate::config::Configuration;
use crate::leads::Lead;
use serde::{Deserialize, Serialize};

/// Time-ordered samples for one lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadTrace {
    pub lead: Lead,
    pub samples: Vec<Sample>,
}

/// Output of one synthesis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLeadOutput {
    /// One trace per lead in canonical order
    pub leads: Vec<LeadTrace>,
    /// Configuration snapshot the traces were built from
    pub configuration: Configuration,
    /// Creation time, Unix milliseconds
    pub timestamp: u64,
}

impl LeadTrace {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True when sample times never decrease
    pub fn is_time_ordered(&self) -> bool {
        self.samples.windows(2).all(|pair| pair[0].time <= pair[1].time)
    }
}

impl MultiLeadOutput {
    pub fn lead(&self, lead: Lead) -> Option<&LeadTrace> {
        self.leads.iter().find(|trace| trace.lead == lead)
    }
}
