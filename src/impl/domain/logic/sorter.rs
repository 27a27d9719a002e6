use std::{cmp::Ordering, collections::HashMap};

use crate::entities::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortOrder {
    /// Weakest first.
    Ascending,
    /// Strongest first.
    Descending,
}

/// Rank order of two entries, weakest first: lower total is weaker, and on
/// equal totals the lexicographically greater id is weaker (lowest id wins
/// ties).
pub(crate) fn rank_cmp(a: &Entry, b: &Entry) -> Ordering {
    rank_cmp_parts(&a.id, a.total, &b.id, b.total)
}

pub(crate) fn rank_cmp_parts(a_id: &str, a_total: f64, b_id: &str, b_total: f64) -> Ordering {
    a_total.total_cmp(&b_total).then_with(|| b_id.cmp(a_id))
}

pub(crate) fn sort_entries(entries: &mut [Entry], order: SortOrder) {
    match order {
        SortOrder::Ascending => entries.sort_by(rank_cmp),
        SortOrder::Descending => entries.sort_by(|a, b| rank_cmp(b, a)),
    }
}

pub(crate) fn entries_of(amts: &HashMap<String, f64>) -> Vec<Entry> {
    amts.iter()
        .map(|(id, total)| Entry::new(id.clone(), *total))
        .collect()
}

/// The `k` weakest entries of the map, weakest first.
pub(crate) fn weakest(amts: &HashMap<String, f64>, k: usize) -> Vec<Entry> {
    let mut entries = entries_of(amts);
    sort_entries(&mut entries, SortOrder::Ascending);
    entries.truncate(k);
    entries
}

/// The `n` strongest entries of the map, strongest first.
pub(crate) fn strongest(amts: &HashMap<String, f64>, n: usize) -> Vec<Entry> {
    let mut entries = entries_of(amts);
    sort_entries(&mut entries, SortOrder::Descending);
    entries.truncate(n);
    entries
}
