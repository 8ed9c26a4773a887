//! Time window filtering for `--range START..END`

use crate::error::AnalysisError;
use crate::record::PhaseRecord;
use chrono::{DateTime, Utc};

/// Half-open RFC3339 window used to narrow a batch before analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

impl TimeWindow {
    /// Parse a window from `START..END`
    pub fn from_range(range: &str) -> Result<Self, AnalysisError> {
        let (start, end) = range.split_once("..").ok_or_else(|| {
            AnalysisError::InvalidRange(
                "range must be in format START..END (RFC3339 timestamps)".to_string(),
            )
        })?;

        let start = parse_timestamp(start.trim())
            .ok_or_else(|| AnalysisError::InvalidRange(format!("bad start timestamp: {start}")))?;
        let end = parse_timestamp(end.trim())
            .ok_or_else(|| AnalysisError::InvalidRange(format!("bad end timestamp: {end}")))?;

        if end <= start {
            return Err(AnalysisError::InvalidRange(
                "range end must be after start".to_string(),
            ));
        }

        Ok(Self { start, end })
    }

    /// Overlap test with an explicit "now" for phases that have not ended
    pub fn overlaps_at(&self, phase: &PhaseRecord, now: DateTime<Utc>) -> bool {
        let Some(start) = phase.start_time.as_deref().and_then(parse_timestamp) else {
            return false;
        };
        let end = phase
            .end_time
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now);

        start < self.end && end > self.start
    }

    /// Keep only the phases that overlap the window
    pub fn filter(&self, batch: Vec<PhaseRecord>) -> Vec<PhaseRecord> {
        let now = Utc::now();
        let before = batch.len();
        let kept: Vec<PhaseRecord> = batch
            .into_iter()
            .filter(|p| self.overlaps_at(p, now))
            .collect();

        if kept.len() < before {
            tracing::warn!(
                dropped = before - kept.len(),
                kept = kept.len(),
                "phases outside the time window were dropped"
            );
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase(start: Option<&str>, end: Option<&str>) -> PhaseRecord {
        let mut p = PhaseRecord::new("w", "code", 0, 60.0, true);
        p.start_time = start.map(str::to_string);
        p.end_time = end.map(str::to_string);
        p
    }

    fn window() -> TimeWindow {
        TimeWindow::from_range("2025-01-01T10:00:00Z..2025-01-01T12:00:00Z").unwrap()
    }

    #[test]
    fn test_from_range_accepts_offsets() {
        let w = TimeWindow::from_range("2025-01-01T10:00:00+00:00..2025-01-01T11:00:00Z").unwrap();
        assert!(w.end > w.start);
    }

    #[test]
    fn test_from_range_rejects_bad_input() {
        assert!(TimeWindow::from_range("2025-01-01T10:00:00Z").is_err());
        assert!(TimeWindow::from_range("yesterday..today").is_err());
        assert!(
            TimeWindow::from_range("2025-01-01T12:00:00Z..2025-01-01T10:00:00Z").is_err()
        );
    }

    #[test]
    fn test_overlap_rules() {
        let w = window();
        let now = parse_timestamp("2025-01-02T00:00:00Z").unwrap();

        assert!(w.overlaps_at(
            &phase(Some("2025-01-01T09:00:00Z"), Some("2025-01-01T10:30:00Z")),
            now
        ));
        // Ends exactly at window start
        assert!(!w.overlaps_at(
            &phase(Some("2025-01-01T09:00:00Z"), Some("2025-01-01T10:00:00Z")),
            now
        ));
        // Still running
        assert!(w.overlaps_at(&phase(Some("2025-01-01T11:00:00Z"), None), now));
        assert!(!w.overlaps_at(&phase(Some("2025-01-01T13:00:00Z"), None), now));
        // No start time
        assert!(!w.overlaps_at(&phase(None, Some("2025-01-01T11:00:00Z")), now));
    }

    #[test]
    fn test_filter_keeps_overlapping() {
        let batch = vec![
            phase(Some("2025-01-01T10:15:00Z"), Some("2025-01-01T10:45:00Z")),
            phase(Some("2024-12-31T10:15:00Z"), Some("2024-12-31T10:45:00Z")),
            phase(None, None),
        ];
        let kept = window().filter(batch);
        assert_eq!(kept.len(), 1);
    }
}
