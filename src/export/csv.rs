//! CSV export
//! Location: src/export/csv.rs

use super::fixed;
use crate::synthesis::MultiLeadOutput;

const DECIMALS: usize = 6;

/// `time,<lead>,...` followed by one row per sample index.
///
/// Row times come from the first lead; a lead shorter than the longest
/// leaves empty cells. No leads gives an empty string.
pub fn to_csv(output: &MultiLeadOutput) -> String {
    let leads = &output.leads;
    let Some(first) = leads.first() else {
        return String::new();
    };
    let rows = leads.iter().map(|trace| trace.samples.len()).max().unwrap_or(0);

    let mut csv = String::from("time");
    for trace in leads {
        csv.push(',');
        csv.push_str(trace.lead.as_str());
    }
    csv.push('\n');

    for i in 0..rows {
        if let Some(sample) = first.samples.get(i) {
            csv.push_str(&fixed(sample.time, DECIMALS));
        }
        for trace in leads {
            csv.push(',');
            if let Some(sample) = trace.samples.get(i) {
                csv.push_str(&fixed(sample.amplitude, DECIMALS));
            }
        }
        csv.push('\n');
    }

    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::leads::Lead;
    use crate::synthesis::{LeadTrace, Sample};

    fn trace(lead: Lead, values: &[f64]) -> LeadTrace {
        LeadTrace {
            lead,
            samples: values
                .iter()
                .enumerate()
                .map(|(i, v)| Sample::new(i as f64 / 1000.0, *v))
                .collect(),
        }
    }

    fn output(leads: Vec<LeadTrace>) -> MultiLeadOutput {
        MultiLeadOutput {
            leads,
            configuration: Configuration::default(),
            timestamp: 0,
        }
    }

    #[test]
    fn test_two_lead_table() {
        let csv = to_csv(&output(vec![
            trace(Lead::I, &[0.0, 0.5, 0.0]),
            trace(Lead::II, &[0.0, 0.8, 0.0]),
        ]));
        assert_eq!(
            csv,
            "time,I,II\n\
             0.000000,0.000000,0.000000\n\
             0.001000,0.500000,0.800000\n\
             0.002000,0.000000,0.000000\n"
        );
    }

    #[test]
    fn test_short_lead_padded_with_empty_cells() {
        let csv = to_csv(&output(vec![
            trace(Lead::V1, &[0.1, 0.2]),
            trace(Lead::V2, &[0.3]),
        ]));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[2], "0.001000,0.200000,");
    }

    #[test]
    fn test_longer_later_lead_leaves_time_empty() {
        let csv = to_csv(&output(vec![trace(Lead::I, &[0.1]), trace(Lead::II, &[0.1, -0.2])]));
        assert!(csv.ends_with(",,-0.200000\n"));
    }

    #[test]
    fn test_negative_zero_normalized() {
        let csv = to_csv(&output(vec![trace(Lead::AVR, &[-0.0])]));
        assert_eq!(csv, "time,aVR\n0.000000,0.000000\n");
    }

    #[test]
    fn test_no_leads() {
        assert_eq!(to_csv(&output(Vec::new())), "");
    }
}
