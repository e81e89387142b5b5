//! JSON export and validated import
//! Location: src/export/json.rs

use crate::error::{EcgErrorBuilder, EcgResult, ExportFormat};
use crate::synthesis::MultiLeadOutput;

/// Pretty-printed JSON, 2-space indent
pub fn to_json(output: &MultiLeadOutput) -> EcgResult<String> {
    serde_json::to_string_pretty(output).map_err(|e| {
        EcgErrorBuilder::new("export", "to_json").serialization(ExportFormat::Json, &e.to_string())
    })
}

/// Parse JSON produced by [`to_json`] and check it is usable
pub fn from_json(input: &str) -> EcgResult<MultiLeadOutput> {
    let invalid = |reason: String| {
        EcgErrorBuilder::new("export", "from_json")
            .serialization(ExportFormat::Json, &format!("Invalid ECG JSON data: {reason}"))
    };

    let output: MultiLeadOutput = serde_json::from_str(input).map_err(|e| invalid(e.to_string()))?;

    if let Some(trace) = output.leads.iter().find(|trace| !trace.is_time_ordered()) {
        return Err(invalid(format!("lead {} has decreasing sample times", trace.lead)));
    }
    output
        .configuration
        .validate()
        .map_err(|e| invalid(e.to_string()))?;

    Ok(output)
}
