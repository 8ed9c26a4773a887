//! Single-pass analysis of a phase batch
//!
//! [`analyze`] is a pure function of the batch and the configuration. All
//! grouping views are built here, reduced to owned summaries, and dropped
//! before returning.

use crate::aggregate::{
    classify_by_attribution, phase_name_zero_rate, split_zero_by_archived, PhaseNameRate, Totals,
};
use crate::anomaly::{SuspiciousPhase, SuspiciousPhaseDetector};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::recommend::{recommend, Recommendation, RuleInputs};
use crate::record::PhaseRecord;
use crate::stats::DurationComparison;
use crate::workflow::{classify_workflows, WorkflowSummary};
use serde::Serialize;

/// Transcript matching counters of one live phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptMatch {
    pub phase_name: String,
    pub events_examined: u64,
    pub events_matched: u64,
    pub tokens_attributed: u64,
}

/// Everything the renderers need, computed once
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub totals: Totals,
    pub zero_archived: usize,
    pub zero_live: usize,
    /// Every suspicious phase, longest first
    pub suspicious: Vec<SuspiciousPhase>,
    pub phase_rates: Vec<PhaseNameRate>,
    pub workflows: WorkflowSummary,
    pub transcript_matches: Vec<TranscriptMatch>,
    pub recommendations: Vec<Recommendation>,
    pub durations: DurationComparison,
    pub config: AnalysisConfig,
}

impl Analysis {
    /// The head of the suspicious list shown in reports
    pub fn top_suspicious(&self) -> &[SuspiciousPhase] {
        let n = self.suspicious.len().min(self.config.top_suspicious);
        &self.suspicious[..n]
    }
}

/// Analyze a complete batch
pub fn analyze(batch: &[PhaseRecord], config: &AnalysisConfig) -> Result<Analysis, AnalysisError> {
    config.validate()?;
    let totals = Totals::from_batch(batch)?;

    let (zero, nonzero) = classify_by_attribution(batch);
    let split = split_zero_by_archived(batch);

    let suspicious: Vec<SuspiciousPhase> = SuspiciousPhaseDetector::from_config(config)
        .detect(zero.iter().copied())
        .into_iter()
        .map(SuspiciousPhase::from)
        .collect();

    let workflows = classify_workflows(batch);

    let transcript_matches: Vec<TranscriptMatch> = batch
        .iter()
        .filter(|p| p.is_live())
        .filter_map(|p| {
            p.transcript_events_examined.map(|examined| TranscriptMatch {
                phase_name: p.phase_name.clone(),
                events_examined: examined,
                events_matched: p.transcript_events_matched.unwrap_or(0),
                tokens_attributed: p.tokens_attributed,
            })
        })
        .collect();

    let recommendations = recommend(&RuleInputs {
        suspicious_count: suspicious.len(),
        systemic_bug_min_suspicious: config.systemic_bug_min_suspicious,
        representative_workflow: suspicious.first().map(|s| s.workflow_id.as_str()),
        mixed_workflows: workflows.mixed.len(),
        live_zero_phases: split.live.len(),
    });

    tracing::debug!(
        total = totals.total_phases,
        zero = totals.zero_phases,
        suspicious = suspicious.len(),
        recommendations = recommendations.len(),
        "analysis complete"
    );

    Ok(Analysis {
        zero_archived: split.archived.len(),
        zero_live: split.live.len(),
        phase_rates: phase_name_zero_rate(batch),
        durations: DurationComparison::new(&zero, &nonzero),
        totals,
        suspicious,
        workflows,
        transcript_matches,
        recommendations,
        config: config.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::MixedWorkflow;

    fn p(wid: &str, name: &str, tokens: u64, secs: f64) -> PhaseRecord {
        PhaseRecord::new(wid, name, tokens, secs, true)
    }

    #[test]
    fn test_three_phase_scenario() {
        let batch = vec![
            p("w1", "spec", 0, 400.0),
            p("w1", "plan", 5, 10.0),
            p("w1", "code", 0, 2.0),
        ];
        let analysis = analyze(&batch, &AnalysisConfig::default()).unwrap();

        assert_eq!(analysis.totals.zero_phases, 2);
        assert_eq!(analysis.totals.nonzero_phases, 1);
        assert_eq!(analysis.suspicious.len(), 1);
        assert_eq!(analysis.suspicious[0].duration_seconds, 400.0);
        assert_eq!(
            analysis.workflows.mixed,
            vec![MixedWorkflow {
                workflow_id: "w1".to_string(),
                zero_count: 2,
                total: 3
            }]
        );
        let ids: Vec<_> = analysis.recommendations.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["mixed_workflows"]);
    }

    #[test]
    fn test_empty_batch() {
        assert!(matches!(
            analyze(&[], &AnalysisConfig::default()),
            Err(AnalysisError::EmptyBatch)
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            top_suspicious: 0,
            ..Default::default()
        };
        assert!(matches!(
            analyze(&[p("w", "a", 1, 1.0)], &config),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_fifteen_suspicious_phases() {
        let mut batch: Vec<_> = (0..15)
            .map(|i| p(&format!("w{i:02}"), "code", 0, 301.0))
            .collect();
        batch.push(p("ok", "code", 9, 1000.0));

        let analysis = analyze(&batch, &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.suspicious.len(), 15);

        let shown: Vec<_> = analysis
            .top_suspicious()
            .iter()
            .map(|s| s.workflow_id.as_str())
            .collect();
        assert_eq!(shown.len(), 10);
        assert_eq!(shown[0], "w00");
        assert_eq!(shown[9], "w09");

        assert_eq!(analysis.recommendations[0].id, "systemic_bug");
        assert!(analysis.recommendations[0]
            .lines
            .iter()
            .any(|l| l.contains("w00")));
    }

    #[test]
    fn test_transcript_matches_only_for_live_phases_with_counters() {
        let mut live = PhaseRecord::new("w1", "code", 0, 10.0, false);
        live.transcript_events_examined = Some(12);
        let live_without = PhaseRecord::new("w1", "review", 0, 10.0, false);
        let mut archived = PhaseRecord::new("w0", "code", 3, 10.0, true);
        archived.transcript_events_examined = Some(4);

        let analysis =
            analyze(&[live, live_without, archived], &AnalysisConfig::default()).unwrap();

        assert_eq!(
            analysis.transcript_matches,
            vec![TranscriptMatch {
                phase_name: "code".to_string(),
                events_examined: 12,
                events_matched: 0,
                tokens_attributed: 0,
            }]
        );
        assert_eq!(analysis.zero_live, 2);
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.id == "live_zero_phases"));
    }

    #[test]
    fn test_top_suspicious_respects_config() {
        let batch: Vec<_> = (0..5).map(|i| p(&format!("w{i}"), "a", 0, 500.0)).collect();
        let config = AnalysisConfig {
            top_suspicious: 2,
            ..Default::default()
        };
        let analysis = analyze(&batch, &config).unwrap();
        assert_eq!(analysis.suspicious.len(), 5);
        assert_eq!(analysis.top_suspicious().len(), 2);
    }
}
