//! Human-readable text report
//!
//! Column widths and precisions are fixed so that reports from different
//! runs can be diffed line by line.

use crate::analysis::Analysis;
use crate::stats::DurationStats;

const BANNER_WIDTH: usize = 80;
const NAME_WIDTH: usize = 15;

fn banner(report: &mut String, title: &str) {
    let rule = "=".repeat(BANNER_WIDTH);
    report.push_str(&rule);
    report.push('\n');
    report.push_str(title);
    report.push('\n');
    report.push_str(&rule);
    report.push('\n');
}

/// `>5min` for whole minutes, `>90s` otherwise
fn threshold_label(secs: f64) -> String {
    if secs > 0.0 && secs % 60.0 == 0.0 {
        format!(">{}min", secs / 60.0)
    } else {
        format!(">{}s", secs)
    }
}

/// Render the full report
///
/// `stats_extended` appends the duration distribution section.
pub fn render_text(analysis: &Analysis, stats_extended: bool) -> String {
    let mut report = String::new();

    banner(&mut report, "TOKEN ATTRIBUTION ANALYSIS");
    report.push('\n');

    // Totals
    let totals = &analysis.totals;
    report.push_str(&format!("Total phases analyzed: {}\n", totals.total_phases));
    report.push_str(&format!(
        "Zero-token phases:     {} ({:.1}%)\n",
        totals.zero_phases, totals.zero_percent
    ));
    report.push_str(&format!(
        "Non-zero token phases: {} ({:.1}%)\n",
        totals.nonzero_phases, totals.nonzero_percent
    ));
    report.push('\n');

    // Archived vs live
    report.push_str("Zero-token breakdown:\n");
    report.push_str(&format!("  Archived phases: {}\n", analysis.zero_archived));
    report.push_str(&format!("  Live phases:     {}\n", analysis.zero_live));
    report.push('\n');

    // Suspicious phases
    report.push_str(&format!(
        "Suspicious phases ({} duration, 0 tokens): {}\n",
        threshold_label(analysis.config.suspicious_duration_secs),
        analysis.suspicious.len()
    ));
    if !analysis.suspicious.is_empty() {
        report.push('\n');
        report.push_str(&format!(
            "Top {} suspicious phases by duration:\n",
            analysis.config.top_suspicious
        ));
        for phase in analysis.top_suspicious() {
            report.push_str(&format!(
                "  {} | {:<width$.width$} | {:7.1} min | 0 tokens\n",
                phase.workflow_id,
                phase.phase_name,
                phase.duration_minutes,
                width = NAME_WIDTH
            ));
        }
    }
    report.push('\n');

    // Phase names
    report.push_str("Zero-token rate by phase name:\n");
    for rate in &analysis.phase_rates {
        report.push_str(&format!(
            "  {:<width$}: {:3}/{:3} ({:5.1}%)\n",
            rate.phase_name,
            rate.zero_count,
            rate.total,
            rate.zero_rate_percent,
            width = NAME_WIDTH
        ));
    }
    report.push('\n');

    // Workflows
    let workflows = &analysis.workflows;
    report.push_str("Workflow-level patterns:\n");
    report.push_str(&format!(
        "  All phases have 0 tokens:    {} workflows\n",
        workflows.all_zero.len()
    ));
    report.push_str(&format!(
        "  All phases have >0 tokens:   {} workflows\n",
        workflows.all_nonzero.len()
    ));
    report.push_str(&format!(
        "  Mixed (some 0, some >0):     {} workflows\n",
        workflows.mixed.len()
    ));
    report.push('\n');

    // Live transcript matching
    if !analysis.transcript_matches.is_empty() {
        report.push_str("Live phase transcript matching:\n");
        for m in &analysis.transcript_matches {
            report.push_str(&format!(
                "  {:<width$}: examined {:3}, matched {:3}, tokens {:5}\n",
                m.phase_name,
                m.events_examined,
                m.events_matched,
                m.tokens_attributed,
                width = NAME_WIDTH
            ));
        }
        report.push('\n');
    }

    banner(&mut report, "RECOMMENDATIONS");
    let blocks: Vec<String> = analysis
        .recommendations
        .iter()
        .map(|rec| {
            rec.lines
                .iter()
                .map(|line| format!("{line}\n"))
                .collect::<String>()
        })
        .collect();
    report.push_str(&blocks.join("\n"));

    if stats_extended {
        report.push('\n');
        render_duration_distribution(&mut report, analysis);
    }

    report
}

fn render_duration_distribution(report: &mut String, analysis: &Analysis) {
    banner(report, "DURATION DISTRIBUTION (minutes)");
    report.push_str(&format!(
        "  {:<12} {:>6} {:>8} {:>8} {:>8} {:>8}\n",
        "class", "count", "mean", "median", "p90", "max"
    ));

    let rows: [(&str, &Option<DurationStats>); 2] = [
        ("zero-token", &analysis.durations.zero_token),
        ("non-zero", &analysis.durations.nonzero_token),
    ];
    for (label, stats) in rows {
        match stats {
            Some(s) => report.push_str(&format!(
                "  {:<12} {:>6} {:>8.1} {:>8.1} {:>8.1} {:>8.1}\n",
                label, s.count, s.mean, s.median, s.p90, s.max
            )),
            None => report.push_str(&format!(
                "  {:<12} {:>6} {:>8} {:>8} {:>8} {:>8}\n",
                label, 0, "-", "-", "-", "-"
            )),
        }
    }
}
