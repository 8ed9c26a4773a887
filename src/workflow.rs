//! Workflow-level attribution patterns

use crate::aggregate::group_by;
use crate::record::PhaseRecord;
use serde::Serialize;

/// Attribution pattern of one workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "class", rename_all = "snake_case")]
pub enum WorkflowClass {
    /// Every phase had zero tokens
    AllZero,
    /// No phase had zero tokens
    AllNonzero,
    /// Some phases had zero tokens, some did not
    Mixed { zero_count: usize, total: usize },
}

impl WorkflowClass {
    /// Classify from the zero-token count of a workflow's phases
    pub fn from_counts(zero_count: usize, total: usize) -> Self {
        if zero_count == total {
            WorkflowClass::AllZero
        } else if zero_count == 0 {
            WorkflowClass::AllNonzero
        } else {
            WorkflowClass::Mixed { zero_count, total }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixedWorkflow {
    pub workflow_id: String,
    pub zero_count: usize,
    pub total: usize,
}

/// Distinct workflow ids partitioned by attribution pattern
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkflowSummary {
    pub all_zero: Vec<String>,
    pub all_nonzero: Vec<String>,
    pub mixed: Vec<MixedWorkflow>,
}

impl WorkflowSummary {
    /// Number of distinct workflows
    pub fn total(&self) -> usize {
        self.all_zero.len() + self.all_nonzero.len() + self.mixed.len()
    }
}

/// Classify every workflow in the batch, keeping first-seen order per class
pub fn classify_workflows(batch: &[PhaseRecord]) -> WorkflowSummary {
    let mut summary = WorkflowSummary::default();

    for (workflow_id, phases) in group_by(batch, |p| p.workflow_id.as_str()).iter() {
        let zero_count = phases.iter().filter(|p| p.is_zero()).count();
        let workflow_id = (*workflow_id).to_string();

        match WorkflowClass::from_counts(zero_count, phases.len()) {
            WorkflowClass::AllZero => summary.all_zero.push(workflow_id),
            WorkflowClass::AllNonzero => summary.all_nonzero.push(workflow_id),
            WorkflowClass::Mixed { zero_count, total } => summary.mixed.push(MixedWorkflow {
                workflow_id,
                zero_count,
                total,
            }),
        }
    }

    tracing::debug!(
        all_zero = summary.all_zero.len(),
        all_nonzero = summary.all_nonzero.len(),
        mixed = summary.mixed.len(),
        "classified workflows"
    );
    summary
}
