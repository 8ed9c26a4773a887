//! JSON output format for attribution analyses
//!
//! `--format json` implementation

use crate::aggregate::{PhaseNameRate, Totals};
use crate::analysis::{Analysis, TranscriptMatch};
use crate::anomaly::SuspiciousPhase;
use crate::stats::DurationComparison;
use crate::workflow::WorkflowSummary;
use serde::Serialize;

/// Zero-token counts by archived status
#[derive(Debug, Clone, Serialize)]
pub struct JsonZeroBreakdown {
    pub archived: usize,
    pub live: usize,
}

/// Suspicious phase summary
#[derive(Debug, Clone, Serialize)]
pub struct JsonSuspicious {
    /// Zero-token phases above the threshold
    pub count: usize,
    pub threshold_secs: f64,
    /// Longest phases, limited to `top_suspicious`
    pub top: Vec<SuspiciousPhase>,
}

/// A fired recommendation
#[derive(Debug, Clone, Serialize)]
pub struct JsonRecommendation {
    pub id: String,
    pub message: String,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Crate version that produced the document
    pub version: String,
    /// Format name
    pub format: String,
    pub totals: Totals,
    pub zero_token_breakdown: JsonZeroBreakdown,
    pub suspicious: JsonSuspicious,
    pub phase_names: Vec<PhaseNameRate>,
    pub workflows: WorkflowSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transcript_matching: Vec<TranscriptMatch>,
    pub recommendations: Vec<JsonRecommendation>,
    /// Duration distribution (if --stats-extended enabled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durations: Option<DurationComparison>,
}

impl JsonOutput {
    /// Build the document from a finished analysis
    pub fn from_analysis(analysis: &Analysis, stats_extended: bool) -> Self {
        let recommendations = analysis
            .recommendations
            .iter()
            .map(|rec| JsonRecommendation {
                id: rec.id.to_string(),
                message: rec
                    .lines
                    .iter()
                    .map(|l| l.trim())
                    .collect::<Vec<_>>()
                    .join("\n"),
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "cuenta-json-v1".to_string(),
            totals: analysis.totals.clone(),
            zero_token_breakdown: JsonZeroBreakdown {
                archived: analysis.zero_archived,
                live: analysis.zero_live,
            },
            suspicious: JsonSuspicious {
                count: analysis.suspicious.len(),
                threshold_secs: analysis.config.suspicious_duration_secs,
                top: analysis.top_suspicious().to_vec(),
            },
            phase_names: analysis.phase_rates.clone(),
            workflows: analysis.workflows.clone(),
            transcript_matching: analysis.transcript_matches.clone(),
            recommendations,
            durations: stats_extended.then(|| analysis.durations.clone()),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
