//! Suspicious zero-token phase detection
//!
//! A phase that consumed minutes of wall-clock time yet had no tokens
//! attributed to it is the strongest single signal of an attribution bug.
//! Fast zero-token phases are left alone: they may legitimately do no
//! attributable work.

use crate::config::AnalysisConfig;
use crate::record::PhaseRecord;
use serde::Serialize;

/// A zero-token phase whose duration exceeded the threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuspiciousPhase {
    pub workflow_id: String,
    pub phase_name: String,
    pub duration_seconds: f64,
    pub duration_minutes: f64,
}

impl From<&PhaseRecord> for SuspiciousPhase {
    fn from(phase: &PhaseRecord) -> Self {
        Self {
            workflow_id: phase.workflow_id.clone(),
            phase_name: phase.phase_name.clone(),
            duration_seconds: phase.duration_seconds,
            duration_minutes: phase.duration_minutes(),
        }
    }
}

/// Detector for long-running zero-token phases
#[derive(Debug, Clone)]
pub struct SuspiciousPhaseDetector {
    threshold_secs: f64,
}

impl Default for SuspiciousPhaseDetector {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl SuspiciousPhaseDetector {
    pub fn new(threshold_secs: f64) -> Self {
        Self { threshold_secs }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.suspicious_duration_secs)
    }

    pub fn threshold_secs(&self) -> f64 {
        self.threshold_secs
    }

    /// Check a single phase
    pub fn is_suspicious(&self, phase: &PhaseRecord) -> bool {
        phase.is_zero() && phase.duration_seconds > self.threshold_secs
    }

    /// All suspicious phases, longest first
    ///
    /// Equal durations keep batch order (stable sort).
    pub fn detect<'a, I>(&self, phases: I) -> Vec<&'a PhaseRecord>
    where
        I: IntoIterator<Item = &'a PhaseRecord>,
    {
        let mut suspicious: Vec<&PhaseRecord> = phases
            .into_iter()
            .filter(|p| self.is_suspicious(p))
            .collect();

        suspicious.sort_by(|a, b| {
            b.duration_seconds
                .partial_cmp(&a.duration_seconds)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::debug!(
            count = suspicious.len(),
            threshold_secs = self.threshold_secs,
            "suspicious zero-token phases"
        );
        suspicious
    }
}
