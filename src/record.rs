//! Phase record model and batch decoding
//!
//! The upstream engine's debug export is one JSON array of phase objects.
//! Newline-delimited objects are accepted as well so that batches can be
//! concatenated with ordinary shell tools.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;

/// Fields every record must carry with a non-null value
pub const REQUIRED_FIELDS: [&str; 5] = [
    "workflow_id",
    "phase_name",
    "tokens_attributed",
    "duration_seconds",
    "is_archived",
];

/// One workflow execution phase as reported by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub workflow_id: String,
    pub phase_name: String,
    pub tokens_attributed: u64,
    pub duration_seconds: f64,
    pub is_archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_events_examined: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_events_matched: Option<u64>,
    /// Phase start (RFC3339), only consulted by `--range`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Phase end (RFC3339); absent while the phase is still running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl PhaseRecord {
    /// Build a record with the required fields only
    pub fn new(
        workflow_id: impl Into<String>,
        phase_name: impl Into<String>,
        tokens_attributed: u64,
        duration_seconds: f64,
        is_archived: bool,
    ) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            phase_name: phase_name.into(),
            tokens_attributed,
            duration_seconds,
            is_archived,
            transcript_events_examined: None,
            transcript_events_matched: None,
            start_time: None,
            end_time: None,
        }
    }

    /// True when no tokens were attributed to this phase
    pub fn is_zero(&self) -> bool {
        self.tokens_attributed == 0
    }

    /// True for phases of an in-progress (non-archived) workflow
    pub fn is_live(&self) -> bool {
        !self.is_archived
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds / 60.0
    }

    /// Decode one record, reporting which required field is missing
    fn from_value(index: usize, value: Value) -> Result<Self, AnalysisError> {
        let obj = value.as_object().ok_or_else(|| {
            AnalysisError::InputDecode(format!("record {index} is not a JSON object"))
        })?;

        if let Some(field) = REQUIRED_FIELDS
            .iter()
            .copied()
            .find(|f| obj.get(*f).map_or(true, Value::is_null))
        {
            return Err(AnalysisError::MalformedRecord { index, field });
        }

        serde_json::from_value(value)
            .map_err(|e| AnalysisError::InputDecode(format!("record {index}: {e}")))
    }
}

/// Decode a complete batch from its textual encoding
///
/// Blank input decodes to an empty batch; rejecting it is the analyzer's job.
pub fn parse_batch(input: &str) -> Result<Vec<PhaseRecord>, AnalysisError> {
    let trimmed = input.trim_start();

    let values: Vec<Value> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed).map_err(|e| AnalysisError::InputDecode(e.to_string()))?
    } else {
        trimmed
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str(line)
                    .map_err(|e| AnalysisError::InputDecode(format!("line {}: {e}", n + 1)))
            })
            .collect::<Result<_, _>>()?
    };

    let batch = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| PhaseRecord::from_value(index, value))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(records = batch.len(), "decoded phase batch");
    Ok(batch)
}

/// Read the whole input before decoding it
pub fn read_batch<R: Read>(mut reader: R) -> Result<Vec<PhaseRecord>, AnalysisError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_batch(&input)
}
