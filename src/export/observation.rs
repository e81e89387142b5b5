//! FHIR-style clinical observation record
//! Location: src/export/observation.rs
//!
//! One `Observation` resource carrying a `valueSampledData` component per
//! lead. Sample values are written in mV to three decimals.

use super::fixed;
use crate::error::{EcgErrorBuilder, EcgResult, ExportFormat};
use crate::leads::Lead;
use crate::synthesis::{LeadTrace, MultiLeadOutput};
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

const LOINC_SYSTEM: &str = "http://loinc.org";
const SNOMED_SYSTEM: &str = "http://snomed.info/sct";
const UCUM_SYSTEM: &str = "http://unitsofmeasure.org";
const CATEGORY_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/observation-category";
const TWELVE_LEAD_EKG: &str = "11524-6";
const DATA_DECIMALS: usize = 3;
const LIMIT_MV: f64 = 5.0;

/// SNOMED CT code for a lead
pub fn snomed_code(lead: Lead) -> &'static str {
    match lead {
        Lead::I => "251199002",
        Lead::II => "251200004",
        Lead::III => "251201000",
        Lead::AVR => "251202007",
        Lead::AVL => "251203002",
        Lead::AVF => "251204008",
        Lead::V1 => "251205009",
        Lead::V2 => "251206005",
        Lead::V3 => "251207001",
        Lead::V4 => "251208006",
        Lead::V5 => "251209003",
        Lead::V6 => "251210008",
    }
}

/// Build the observation; `patient_id` adds a `subject` reference
pub fn to_observation(output: &MultiLeadOutput, patient_id: Option<&str>) -> EcgResult<Value> {
    let config = &output.configuration;
    let period_ms = 1000.0 / config.sampling_rate;

    let mut record = json!({
        "resourceType": "Observation",
        "id": format!("ecg-{}", output.timestamp),
        "status": "final",
        "category": [{
            "coding": [{
                "system": CATEGORY_SYSTEM,
                "code": "survey",
                "display": "Survey"
            }]
        }],
        "code": {
            "coding": [{
                "system": LOINC_SYSTEM,
                "code": TWELVE_LEAD_EKG,
                "display": "12-lead EKG"
            }]
        },
        "effectiveDateTime": effective_date_time(output.timestamp)?,
        "component": output
            .leads
            .iter()
            .map(|trace| lead_component(trace, period_ms))
            .collect::<Vec<_>>(),
        "note": [{
            "text": format!(
                "Generated ECG with heart rate {} bpm, duration {}s",
                config.heart_rate, config.duration
            )
        }]
    });

    if let (Some(id), Some(fields)) = (patient_id, record.as_object_mut()) {
        fields.insert("subject".to_string(), json!({ "reference": format!("Patient/{id}") }));
    }

    Ok(record)
}

fn lead_component(trace: &LeadTrace, period_ms: f64) -> Value {
    let data = trace
        .samples
        .iter()
        .map(|sample| fixed(sample.amplitude, DATA_DECIMALS))
        .collect::<Vec<_>>()
        .join(" ");

    json!({
        "code": {
            "coding": [{
                "system": SNOMED_SYSTEM,
                "code": snomed_code(trace.lead),
                "display": format!("Lead {}", trace.lead)
            }]
        },
        "valueSampledData": {
            "origin": {
                "value": 0,
                "unit": "mV",
                "system": UCUM_SYSTEM,
                "code": "mV"
            },
            "period": period_ms,
            "factor": 1,
            "lowerLimit": -LIMIT_MV,
            "upperLimit": LIMIT_MV,
            "dimensions": 1,
            "data": data
        }
    })
}

/// RFC 3339 rendering of a Unix-millisecond timestamp
fn effective_date_time(timestamp_millis: u64) -> EcgResult<String> {
    let failed = |reason: String| {
        EcgErrorBuilder::new("export", "to_observation").serialization(ExportFormat::Observation, &reason)
    };

    OffsetDateTime::from_unix_timestamp_nanos(i128::from(timestamp_millis) * 1_000_000)
        .map_err(|e| failed(e.to_string()))?
        .format(&Rfc3339)
        .map_err(|e| failed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::synthesis::Sample;

    fn output() -> MultiLeadOutput {
        MultiLeadOutput {
            leads: vec![
                LeadTrace {
                    lead: Lead::II,
                    samples: vec![Sample::new(0.0, 0.0), Sample::new(0.001, 1.23456), Sample::new(0.002, -0.0004)],
                },
                LeadTrace {
                    lead: Lead::V6,
                    samples: vec![Sample::new(0.0, 0.5)],
                },
            ],
            configuration: Configuration::default(),
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_header_fields() {
        let record = to_observation(&output(), None).unwrap();
        assert_eq!(record["resourceType"], "Observation");
        assert_eq!(record["id"], "ecg-1700000000000");
        assert_eq!(record["status"], "final");
        assert_eq!(record["code"]["coding"][0]["code"], "11524-6");
        assert_eq!(record["category"][0]["coding"][0]["code"], "survey");
        assert_eq!(record["effectiveDateTime"], "2023-11-14T22:13:20Z");
        assert!(record.get("subject").is_none());
        assert_eq!(
            record["note"][0]["text"],
            "Generated ECG with heart rate 75 bpm, duration 10s"
        );
    }

    #[test]
    fn test_subject_reference() {
        let record = to_observation(&output(), Some("p-17")).unwrap();
        assert_eq!(record["subject"]["reference"], "Patient/p-17");
    }

    #[test]
    fn test_lead_components() {
        let record = to_observation(&output(), None).unwrap();
        let components = record["component"].as_array().unwrap();
        assert_eq!(components.len(), 2);

        let lead_ii = &components[0];
        assert_eq!(lead_ii["code"]["coding"][0]["code"], "251200004");
        assert_eq!(lead_ii["code"]["coding"][0]["display"], "Lead II");

        let sampled = &lead_ii["valueSampledData"];
        assert_eq!(sampled["period"], 1.0);
        assert_eq!(sampled["origin"]["code"], "mV");
        assert_eq!(sampled["lowerLimit"], -5.0);
        assert_eq!(sampled["upperLimit"], 5.0);
        assert_eq!(sampled["data"], "0.000 1.235 0.000");
        assert_eq!(components[1]["code"]["coding"][0]["code"], "251210008");
    }

    #[test]
    fn test_snomed_codes_unique() {
        let mut codes: Vec<&str> = Lead::ALL.iter().map(|lead| snomed_code(*lead)).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 12);
    }
}
