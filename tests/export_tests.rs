// tests/export_tests.rs
//! Export format tests over real synthesis output

use ecg_synth::export::{from_json, to_csv, to_json, to_observation};
use ecg_synth::utils::time::MockTimeProvider;
use ecg_synth::{
    apply_pattern, ClinicalPattern, ConfigPatch, Configuration, EcgError, Lead, LeadTrace,
    MultiLeadOutput, Sample, Synthesizer,
};

fn short_output() -> MultiLeadOutput {
    let base = Configuration::new(ConfigPatch {
        duration: Some(0.5),
        sampling_rate: Some(250.0),
        ..Default::default()
    })
    .unwrap();
    let config = apply_pattern(&base, ClinicalPattern::StemiAnterior).unwrap();
    Synthesizer::new(config)
        .unwrap()
        .with_time_provider(Box::new(MockTimeProvider::new(1_700_000_000_000)))
        .synthesize()
}

#[test]
fn test_json_round_trip_preserves_everything() {
    let output = short_output();
    let json = to_json(&output).unwrap();
    let restored = from_json(&json).unwrap();

    assert_eq!(restored, output);
    assert_eq!(restored.configuration.st_segment.elevation(Lead::V3), 0.5);
}

#[test]
fn test_json_import_rejects_garbage() {
    match from_json("not json") {
        Err(EcgError::Serialization { reason, .. }) => {
            assert!(reason.starts_with("Invalid ECG JSON data"))
        }
        other => panic!("Expected serialization error, got {other:?}"),
    }
}

#[test]
fn test_csv_reference_table() {
    let output = MultiLeadOutput {
        leads: vec![
            LeadTrace {
                lead: Lead::I,
                samples: vec![
                    Sample::new(0.0, 0.0),
                    Sample::new(0.001, 0.5),
                    Sample::new(0.002, 0.0),
                ],
            },
            LeadTrace {
                lead: Lead::II,
                samples: vec![
                    Sample::new(0.0, 0.0),
                    Sample::new(0.001, 0.8),
                    Sample::new(0.002, 0.0),
                ],
            },
        ],
        configuration: Configuration::default(),
        timestamp: 0,
    };

    let csv = to_csv(&output);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "time,I,II",
            "0.000000,0.000000,0.000000",
            "0.001000,0.500000,0.800000",
            "0.002000,0.000000,0.000000",
        ]
    );
}

#[test]
fn test_csv_of_synthesized_output() {
    let output = short_output();
    let csv = to_csv(&output);
    let mut lines = csv.lines();

    assert_eq!(
        lines.next(),
        Some("time,I,II,III,aVR,aVL,aVF,V1,V2,V3,V4,V5,V6")
    );
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), output.leads[0].samples.len());
    assert!(rows.iter().all(|row| row.split(',').count() == 13));
}

#[test]
fn test_observation_of_synthesized_output() {
    let output = short_output();
    let record = to_observation(&output, Some("demo")).unwrap();

    assert_eq!(record["id"], "ecg-1700000000000");
    assert_eq!(record["subject"]["reference"], "Patient/demo");
    assert_eq!(
        record["note"][0]["text"],
        "Generated ECG with heart rate 85 bpm, duration 0.5s"
    );

    let components = record["component"].as_array().unwrap();
    assert_eq!(components.len(), 12);
    let sampled = &components[8]["valueSampledData"];
    assert_eq!(sampled["period"], 4.0);
    let values = sampled["data"].as_str().unwrap().split(' ').count();
    assert_eq!(values, output.leads[8].samples.len());
}
