//! Heuristic recommendations
//!
//! Each rule is an independent (predicate, render) pair. Rules are evaluated
//! in declaration order and any subset of them may fire.

use serde::Serialize;

/// Facts the rules are evaluated against
#[derive(Debug, Clone, Default)]
pub struct RuleInputs<'a> {
    pub suspicious_count: usize,
    pub systemic_bug_min_suspicious: usize,
    /// Workflow of the longest suspicious phase
    pub representative_workflow: Option<&'a str>,
    pub mixed_workflows: usize,
    pub live_zero_phases: usize,
}

/// A fired rule, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub id: &'static str,
    pub lines: Vec<String>,
}

/// One recommendation rule
pub struct Rule {
    pub id: &'static str,
    pub applies: fn(&RuleInputs<'_>) -> bool,
    pub render: fn(&RuleInputs<'_>) -> Vec<String>,
}

impl Rule {
    pub fn evaluate(&self, inputs: &RuleInputs<'_>) -> Option<Recommendation> {
        (self.applies)(inputs).then(|| Recommendation {
            id: self.id,
            lines: (self.render)(inputs),
        })
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("id", &self.id).finish()
    }
}

/// Rules in report order
pub const RULES: &[Rule] = &[
    Rule {
        id: "systemic_bug",
        applies: has_systemic_bug,
        render: render_systemic_bug,
    },
    Rule {
        id: "mixed_workflows",
        applies: has_mixed_workflows,
        render: render_mixed_workflows,
    },
    Rule {
        id: "live_zero_phases",
        applies: has_live_zero_phases,
        render: render_live_zero_phases,
    },
];

fn has_systemic_bug(inputs: &RuleInputs<'_>) -> bool {
    inputs.suspicious_count > inputs.systemic_bug_min_suspicious
}

fn render_systemic_bug(inputs: &RuleInputs<'_>) -> Vec<String> {
    let pick = match inputs.representative_workflow {
        Some(wid) => format!(
            "    - Pick a suspicious workflow (e.g. {}) and examine its archive JSON directly",
            wid
        ),
        None => "    - Pick a suspicious workflow and examine its archive JSON directly".to_string(),
    };

    vec![
        "⚠️  Many long-duration phases with 0 tokens detected.".to_string(),
        "    This suggests a systematic token attribution bug.".to_string(),
        "    Next steps:".to_string(),
        pick,
        "    - Check if transcript.jsonl has events in that timeframe".to_string(),
        "    - Use --verbose mode to see detailed event matching".to_string(),
    ]
}

// Mixed workflows prove the attribution path works at least sometimes
fn has_mixed_workflows(inputs: &RuleInputs<'_>) -> bool {
    inputs.mixed_workflows > 0
}

fn render_mixed_workflows(_: &RuleInputs<'_>) -> Vec<String> {
    vec![
        "✓  Some workflows have mixed attribution (good sign - shows code path works)".to_string(),
        "    Focus debugging on workflows with all-zero phases.".to_string(),
    ]
}

fn has_live_zero_phases(inputs: &RuleInputs<'_>) -> bool {
    inputs.live_zero_phases > 0
}

fn render_live_zero_phases(_: &RuleInputs<'_>) -> Vec<String> {
    vec!["⚠️  Live phases with 0 tokens detected - use --verbose to debug".to_string()]
}

/// Evaluate every rule in order
pub fn recommend(inputs: &RuleInputs<'_>) -> Vec<Recommendation> {
    RULES.iter().filter_map(|rule| rule.evaluate(inputs)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> RuleInputs<'static> {
        RuleInputs {
            systemic_bug_min_suspicious: 10,
            ..Default::default()
        }
    }

    fn ids(recs: &[Recommendation]) -> Vec<&'static str> {
        recs.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_no_rules_fire_on_clean_batch() {
        assert!(recommend(&inputs()).is_empty());
    }

    #[test]
    fn test_systemic_bug_needs_more_than_minimum() {
        let mut i = inputs();
        i.suspicious_count = 10;
        assert!(recommend(&i).is_empty());

        i.suspicious_count = 11;
        i.representative_workflow = Some("wf-42");
        let recs = recommend(&i);
        assert_eq!(ids(&recs), vec!["systemic_bug"]);
        assert!(recs[0].lines.iter().any(|l| l.contains("wf-42")));
        assert!(recs[0].lines.iter().any(|l| l.contains("transcript")));
        assert!(recs[0].lines.iter().any(|l| l.contains("--verbose")));
    }

    #[test]
    fn test_all_rules_fire_in_fixed_order() {
        let i = RuleInputs {
            suspicious_count: 15,
            systemic_bug_min_suspicious: 10,
            representative_workflow: None,
            mixed_workflows: 2,
            live_zero_phases: 1,
        };
        assert_eq!(
            ids(&recommend(&i)),
            vec!["systemic_bug", "mixed_workflows", "live_zero_phases"]
        );
    }

    #[test]
    fn test_rules_are_independent() {
        let mut i = inputs();
        i.live_zero_phases = 3;
        assert_eq!(ids(&recommend(&i)), vec!["live_zero_phases"]);

        let mut i = inputs();
        i.mixed_workflows = 1;
        let recs = recommend(&i);
        assert_eq!(ids(&recs), vec!["mixed_workflows"]);
        assert!(recs[0].lines[1].contains("all-zero"));
    }

    #[test]
    fn test_rule_table_ids_unique() {
        let mut seen: Vec<_> = RULES.iter().map(|r| r.id).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), RULES.len());
    }
}
