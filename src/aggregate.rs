//! Batch aggregation along workflow, phase name, and archived status
//!
//! Every view here borrows from the batch and keeps first-seen order, so the
//! same batch always renders the same report.

use crate::error::AnalysisError;
use crate::record::PhaseRecord;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// Ordered multimap produced by [`group_by`]
#[derive(Debug, Clone)]
pub struct Grouped<'a, K> {
    groups: Vec<(K, Vec<&'a PhaseRecord>)>,
}

impl<'a, K: Eq> Grouped<'a, K> {
    /// Groups in first-seen key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[&'a PhaseRecord])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn get(&self, key: &K) -> Option<&[&'a PhaseRecord]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(k, _)| k)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group phases by an extracted key
///
/// Keys appear in the order they are first seen; phases keep batch order
/// inside their group.
pub fn group_by<'a, I, K, F>(phases: I, key_fn: F) -> Grouped<'a, K>
where
    I: IntoIterator<Item = &'a PhaseRecord>,
    K: Eq + Hash + Clone,
    F: Fn(&'a PhaseRecord) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a PhaseRecord>)> = Vec::new();

    for phase in phases {
        let key = key_fn(phase);
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(phase),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![phase]));
            }
        }
    }

    Grouped { groups }
}

/// Partition a batch into zero-token and non-zero phases
pub fn classify_by_attribution(
    batch: &[PhaseRecord],
) -> (Vec<&PhaseRecord>, Vec<&PhaseRecord>) {
    batch.iter().partition(|p| p.is_zero())
}

/// Zero-token phases split by archived status
#[derive(Debug, Clone, Default)]
pub struct ArchivedSplit<'a> {
    pub archived: Vec<&'a PhaseRecord>,
    pub live: Vec<&'a PhaseRecord>,
}

/// Split the zero-token phases of a batch into archived and live
pub fn split_zero_by_archived(batch: &[PhaseRecord]) -> ArchivedSplit<'_> {
    let grouped = group_by(batch.iter().filter(|p| p.is_zero()), |p| p.is_archived);
    ArchivedSplit {
        archived: grouped.get(&true).map(<[_]>::to_vec).unwrap_or_default(),
        live: grouped.get(&false).map(<[_]>::to_vec).unwrap_or_default(),
    }
}

/// Zero-token rate for one phase name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseNameRate {
    pub phase_name: String,
    pub total: usize,
    pub zero_count: usize,
    pub zero_rate_percent: f64,
}

/// Zero-token rate per phase name, highest rate first
///
/// The sort is stable: equal rates keep first-seen phase-name order.
pub fn phase_name_zero_rate(batch: &[PhaseRecord]) -> Vec<PhaseNameRate> {
    let by_name = group_by(batch, |p| p.phase_name.as_str());

    let mut rates: Vec<PhaseNameRate> = by_name
        .iter()
        .map(|(name, phases)| {
            let total = phases.len();
            let zero_count = phases.iter().filter(|p| p.is_zero()).count();
            PhaseNameRate {
                phase_name: (*name).to_string(),
                total,
                zero_count,
                zero_rate_percent: percent(zero_count, total),
            }
        })
        .collect();

    rates.sort_by(|a, b| {
        b.zero_rate_percent
            .partial_cmp(&a.zero_rate_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rates
}

/// Batch-wide attribution totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub total_phases: usize,
    pub zero_phases: usize,
    pub nonzero_phases: usize,
    pub zero_percent: f64,
    pub nonzero_percent: f64,
}

impl Totals {
    /// Compute totals; an empty batch has no meaningful percentages
    pub fn from_batch(batch: &[PhaseRecord]) -> Result<Self, AnalysisError> {
        if batch.is_empty() {
            return Err(AnalysisError::EmptyBatch);
        }

        let total_phases = batch.len();
        let zero_phases = batch.iter().filter(|p| p.is_zero()).count();
        let nonzero_phases = total_phases - zero_phases;

        Ok(Self {
            total_phases,
            zero_phases,
            nonzero_phases,
            zero_percent: percent(zero_phases, total_phases),
            nonzero_percent: percent(nonzero_phases, total_phases),
        })
    }
}

/// `part / whole * 100`; callers guarantee `whole > 0`
fn percent(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64 * 100.0
}
