//! Duration distribution statistics for `--stats-extended`
//!
//! Compares how long zero-token phases ran against phases that did get
//! tokens. A zero-token population that runs as long as the attributed one
//! points at the attribution code rather than at idle phases.

use crate::record::PhaseRecord;
use serde::Serialize;

/// Duration summary for one attribution class, in minutes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub count: usize,
    pub mean: f32,
    pub median: f32, // P50
    pub p90: f32,
    pub max: f32,
}

impl DurationStats {
    /// Summarize phase durations; `None` for an empty class
    pub fn from_phases(phases: &[&PhaseRecord]) -> Option<Self> {
        if phases.is_empty() {
            return None;
        }

        let minutes: Vec<f32> = phases
            .iter()
            .map(|p| p.duration_minutes() as f32)
            .collect();

        // Trueno for the SIMD reductions
        let v = trueno::Vector::from_slice(&minutes);
        let mean = v.mean().unwrap_or(0.0);
        let max = v.max().unwrap_or(0.0);

        let mut sorted = minutes.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Some(Self {
            count: minutes.len(),
            mean,
            median: calculate_percentile(&sorted, 50.0),
            p90: calculate_percentile(&sorted, 90.0),
            max,
        })
    }
}

/// Zero-token and non-zero duration summaries side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationComparison {
    pub zero_token: Option<DurationStats>,
    pub nonzero_token: Option<DurationStats>,
}

impl DurationComparison {
    pub fn new(zero: &[&PhaseRecord], nonzero: &[&PhaseRecord]) -> Self {
        Self {
            zero_token: DurationStats::from_phases(zero),
            nonzero_token: DurationStats::from_phases(nonzero),
        }
    }
}

/// Linear-interpolated percentile over sorted data
fn calculate_percentile(sorted_data: &[f32], percentile: f32) -> f32 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f32;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f32;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolation() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(calculate_percentile(&data, 50.0), 3.0);
        assert_eq!(calculate_percentile(&data, 0.0), 1.0);
        assert_eq!(calculate_percentile(&data, 100.0), 5.0);
        assert!((calculate_percentile(&data, 90.0) - 4.6).abs() < 1e-5);
    }

    #[test]
    fn test_percentile_single_and_empty() {
        assert_eq!(calculate_percentile(&[7.0], 90.0), 7.0);
        assert_eq!(calculate_percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn test_duration_stats_in_minutes() {
        let a = PhaseRecord::new("w", "a", 0, 60.0, true);
        let b = PhaseRecord::new("w", "b", 0, 180.0, true);
        let c = PhaseRecord::new("w", "c", 0, 120.0, true);
        let stats = DurationStats::from_phases(&[&a, &b, &c]).unwrap();

        assert_eq!(stats.count, 3);
        assert!((stats.mean - 2.0).abs() < 1e-4);
        assert_eq!(stats.median, 2.0);
        assert!((stats.max - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_class_has_no_stats() {
        assert!(DurationStats::from_phases(&[]).is_none());
    }
}
