//! Error taxonomy for batch analysis
//!
//! Every variant is terminal for a run: the report is only produced when the
//! whole batch decoded and analyzed cleanly.

use thiserror::Error;

/// Errors that can occur while decoding or analyzing a phase batch
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Malformed record at index {index}: missing required field `{field}`")]
    MalformedRecord { index: usize, field: &'static str },

    #[error("No phase records supplied: nothing to analyze")]
    EmptyBatch,

    #[error("Failed to decode input: {0}")]
    InputDecode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
