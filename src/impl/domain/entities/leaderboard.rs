use std::collections::HashMap;

use serde_derive::{Deserialize, Serialize};

/// Unit operated on by the sorter and the admission engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub total: f64,
}

/// Size-bounded top-K map of counterparty id to cumulative amount and count.
///
/// Once `amts` reaches capacity, `threshold` caches the weakest members
/// (ascending, see `sorter::rank_cmp`) so that admission decisions can be made
/// without sorting the whole map. An empty `threshold` means "not built yet"
/// and is rebuilt lazily.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(default)]
    pub amts: HashMap<String, f64>,
    #[serde(default)]
    pub txs: HashMap<String, u64>,
    #[serde(default)]
    pub threshold: Vec<Entry>,
}

/// Unbounded running map (no admission policy).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningTotals {
    #[serde(default)]
    pub amts: HashMap<String, f64>,
    #[serde(default)]
    pub txs: HashMap<String, u64>,
}

/// Bounds applied to a leaderboard. Passed in by the caller on every
/// admission; a leaderboard does not store its own limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardLimits {
    pub capacity: usize,
    pub window: usize,
}

/// Result of a single admission call.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    /// Existing member updated, or new member added below capacity.
    Added,
    /// Contested admission succeeded; the evicted entry is returned.
    Replaced { evicted: Entry },
    /// Contested admission failed; the leaderboard is unchanged.
    Rejected,
}

// --

impl Entry {
    pub fn new(id: impl Into<String>, total: f64) -> Self {
        Self {
            id: id.into(),
            total,
        }
    }
}

impl Leaderboard {
    pub fn len(&self) -> usize {
        self.amts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amts.is_empty()
    }

    pub fn amount(&self, id: &str) -> Option<f64> {
        self.amts.get(id).copied()
    }

    pub fn count(&self, id: &str) -> Option<u64> {
        self.txs.get(id).copied()
    }
}

impl RunningTotals {
    pub fn add(&mut self, id: &str, amount: f64, count: u64) {
        *self.amts.entry(id.to_string()).or_insert(0.0) += amount;
        *self.txs.entry(id.to_string()).or_insert(0) += count;
    }

    pub fn amount(&self, id: &str) -> Option<f64> {
        self.amts.get(id).copied()
    }
}
