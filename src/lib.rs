//! Cuenta - token attribution diagnostics for workflow phase telemetry
//!
//! This library aggregates a batch of workflow phase records and reports the
//! patterns that separate a systemic attribution bug from phases that
//! legitimately attributed no tokens: zero-token rates per phase name,
//! long-running zero-token phases, and workflow-level attribution patterns.

pub mod aggregate;
pub mod analysis;
pub mod anomaly;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod json_output;
pub mod recommend;
pub mod record;
pub mod report;
pub mod stats;
pub mod window;
pub mod workflow;

pub use analysis::{analyze, Analysis};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use record::{parse_batch, read_batch, PhaseRecord};
