use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::model::{MetricRecord, ProfileData};

/// Grouped-aggregation operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Sum,
    Mean,
}

/// Distinct canonical values of `key`, in first-seen order. Records missing
/// the key are skipped.
pub fn categorical_domain(records: &[MetricRecord], key: &str) -> Vec<String> {
    let mut domain = Vec::new();
    for record in records {
        if let Some(value) = record.canon(key)
            && !domain.contains(&value)
        {
            domain.push(value);
        }
    }
    domain
}

/// `[min, max]` over the numeric coercions of `key`. No numeric values at
/// all yields the `[+∞, −∞]` sentinel — "no data", not an error.
pub fn numerical_domain(records: &[MetricRecord], key: &str) -> [f64; 2] {
    let mut domain = [f64::INFINITY, f64::NEG_INFINITY];
    for record in records {
        if let Some(value) = record.number(key) {
            domain[0] = domain[0].min(value);
            domain[1] = domain[1].max(value);
        }
    }
    domain
}

/// Sum (or mean) of `data_key` over records whose canonical `group_key`
/// equals `group_value`. `Mean` with no matching records is `NaN`, and a
/// matching record whose `data_key` is missing or non-numeric poisons the
/// result with `NaN` rather than diluting it — callers must guard.
pub fn aggregate(
    op: Aggregate,
    records: &[MetricRecord],
    group_key: &str,
    group_value: &str,
    data_key: &str,
) -> f64 {
    let mut sum = 0.0;
    let mut count: u32 = 0;
    for record in records {
        if record.canon(group_key).as_deref() == Some(group_value) {
            sum += record.number(data_key).unwrap_or(f64::NAN);
            count += 1;
        }
    }
    match op {
        Aggregate::Sum => sum,
        Aggregate::Mean => sum / f64::from(count),
    }
}

/// Dense integer ranks for the distinct values of a field, plus the rank
/// domain `[0, max_rank]` for the ordinal scale built on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdinalMapping {
    pub ranks: HashMap<String, u32>,
    pub domain: [u32; 2],
}

impl OrdinalMapping {
    pub fn rank(&self, value: &str) -> Option<u32> {
        self.ranks.get(value).copied()
    }

    /// Rank back to value. Ranks are unique by construction, so nothing is
    /// lost in the swap.
    pub fn inverse(&self) -> HashMap<u32, String> {
        inverse_mapping(&self.ranks)
    }
}

/// Sort `records` by `key` and assign each distinct value a dense rank.
///
/// Sort-key sniffing matches the loaded data: if the first record's value
/// coerces to a number the sort is numeric, otherwise lexicographic (so
/// numeric ids never sort `"10"` before `"2"`). Equal values share a rank;
/// the rank only advances on a value change.
///
/// Side effect: `records` is reordered in place. Callers rely on the sorted
/// order, so this is part of the contract.
pub fn ordinal_mapping(records: &mut [MetricRecord], key: &str) -> OrdinalMapping {
    let numeric = records.first().is_some_and(|r| r.number(key).is_some());
    if numeric {
        records.sort_by(|a, b| {
            let a = a.number(key).unwrap_or(f64::NAN);
            let b = b.number(key).unwrap_or(f64::NAN);
            a.total_cmp(&b)
        });
    } else {
        records.sort_by(|a, b| a.canon(key).cmp(&b.canon(key)));
    }

    let mut ranks = HashMap::new();
    let mut rank: u32 = 0;
    let mut prev: Option<String> = None;
    for record in records.iter() {
        let Some(value) = record.canon(key) else {
            continue;
        };
        if let Some(p) = &prev
            && *p != value
        {
            rank += 1;
        }
        ranks.entry(value.clone()).or_insert(rank);
        prev = Some(value);
    }

    OrdinalMapping {
        ranks,
        domain: [0, rank],
    }
}

/// Swap a mapping's keys and values. Colliding values silently overwrite;
/// with unique values this round-trips.
pub fn inverse_mapping<K, V>(map: &HashMap<K, V>) -> HashMap<V, K>
where
    K: Clone + Eq + Hash,
    V: Clone + Eq + Hash,
{
    map.iter().map(|(k, v)| (v.clone(), k.clone())).collect()
}

/// Inclusive metric for one node in one profile: `data_key` of the first
/// record matching both ids. `None` when no record matches.
pub fn inclusive_metric_for_node(
    node_id: &str,
    records: &[MetricRecord],
    profile_id: &str,
    data_key: &str,
) -> Option<f64> {
    records
        .iter()
        .find(|r| {
            r.profile_id().as_deref() == Some(profile_id)
                && r.node_id().as_deref() == Some(node_id)
        })
        .and_then(|r| r.number(data_key))
}

/// Inclusive metric of the whole profile: resolve the canonical root and
/// look its record up. `None` when the graph has no canonical root or the
/// root has no record.
pub fn top_level_inclusive_metric(
    data: &ProfileData,
    profile_id: &str,
    data_key: &str,
) -> Option<f64> {
    let root = data.graph.canonical_root()?;
    inclusive_metric_for_node(root, &data.records, profile_id, data_key)
}
