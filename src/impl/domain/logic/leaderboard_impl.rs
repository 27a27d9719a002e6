use std::cmp::Ordering;

use log::debug;

use crate::entities::{Admission, Entry, Leaderboard, LeaderboardLimits};

use super::sorter::{self, rank_cmp, rank_cmp_parts};

impl Leaderboard {
    /// Adds `amount`/`count` to `id`'s entry, admitting it if there is room or
    /// if it beats the weakest member of a full leaderboard.
    ///
    /// Existing members and admissions below capacity are added directly. A
    /// new id arriving at a full leaderboard must strictly exceed the weakest
    /// member's total (ties keep the incumbent), in which case the weakest
    /// member is evicted.
    pub fn admit_or_update(
        &mut self,
        limits: LeaderboardLimits,
        id: &str,
        amount: f64,
        count: u64,
    ) -> Admission {
        if self.amts.len() > limits.capacity {
            self.trim_to_capacity(limits);
        }

        if let Some(total) = self.amts.get_mut(id) {
            *total += amount;
            *self.txs.entry(id.to_string()).or_insert(0) += count;
            self.refresh_window_after_update(limits, id);
            return Admission::Added;
        }

        if self.amts.len() < limits.capacity {
            self.amts.insert(id.to_string(), amount);
            self.txs.insert(id.to_string(), count);
            // The window only exists for full leaderboards; it is built on the
            // first contested admission.
            self.threshold.clear();
            return Admission::Added;
        }

        self.contest(limits, id, amount, count)
    }

    /// Sets `id`'s total to an absolute value (used for rankings, where the
    /// tracked figure is an entity's running total rather than a delta).
    pub fn record_total(&mut self, limits: LeaderboardLimits, id: &str, total: f64) -> Admission {
        if self.amts.len() > limits.capacity {
            self.trim_to_capacity(limits);
        }
        match self.amts.get_mut(id) {
            Some(current) => {
                *current = total;
                *self.txs.entry(id.to_string()).or_insert(0) += 1;
                self.refresh_window_after_update(limits, id);
                Admission::Added
            }
            None => self.admit_or_update(limits, id, total, 1),
        }
    }

    /// Rebuilds the threshold window from the full map.
    pub(crate) fn rebuild_window(&mut self, limits: LeaderboardLimits) {
        self.threshold = sorter::weakest(&self.amts, limits.window);
        debug!(
            "rebuilt threshold window ({} of {} members)",
            self.threshold.len(),
            self.amts.len()
        );
    }

    /// After an in-place update of a member of a full leaderboard, the window
    /// is stale if the member sits inside it, or now ranks below its largest
    /// entry.
    fn refresh_window_after_update(&mut self, limits: LeaderboardLimits, id: &str) {
        if self.amts.len() < limits.capacity || self.threshold.is_empty() {
            return;
        }
        let in_window = self.threshold.iter().any(|e| e.id == id);
        let below_window_max = match (self.threshold.last(), self.amts.get(id)) {
            (Some(max), Some(total)) => {
                rank_cmp_parts(id, *total, &max.id, max.total) == Ordering::Less
            }
            _ => false,
        };
        if in_window || below_window_max {
            self.rebuild_window(limits);
        }
    }

    fn contest(
        &mut self,
        limits: LeaderboardLimits,
        id: &str,
        amount: f64,
        count: u64,
    ) -> Admission {
        if self.threshold.is_empty() {
            self.rebuild_window(limits);
        }
        let qualifies = match self.threshold.first() {
            Some(weakest) => amount > weakest.total,
            None => false,
        };
        if !qualifies {
            debug!("rejected '{}' ({}) from full leaderboard", id, amount);
            return Admission::Rejected;
        }

        let evicted = self.threshold.remove(0);
        self.amts.remove(&evicted.id);
        self.txs.remove(&evicted.id);
        self.amts.insert(id.to_string(), amount);
        self.txs.insert(id.to_string(), count);

        let candidate = Entry::new(id, amount);
        match self.threshold.last() {
            Some(max) if rank_cmp(&candidate, max) == Ordering::Less => {
                let pos = self
                    .threshold
                    .partition_point(|e| rank_cmp(e, &candidate) == Ordering::Less);
                self.threshold.insert(pos, candidate);
            }
            _ => {
                // Candidate ranks above every remaining window entry, so the
                // next weakest member is found among the non-window members
                // (candidate included) without sorting.
                if let Some(next) = self.weakest_outside_window() {
                    self.threshold.push(next);
                }
            }
        }

        debug!(
            "admitted '{}' ({}), evicted '{}' ({})",
            id, amount, evicted.id, evicted.total
        );
        Admission::Replaced { evicted }
    }

    fn weakest_outside_window(&self) -> Option<Entry> {
        self.amts
            .iter()
            .filter(|(id, _)| !self.threshold.iter().any(|e| &e.id == *id))
            .min_by(|(a_id, a_total), (b_id, b_total)| {
                rank_cmp_parts(a_id, **a_total, b_id, **b_total)
            })
            .map(|(id, total)| Entry::new(id.clone(), *total))
    }

    /// Drops the weakest members of an over-full leaderboard (persisted under
    /// a larger capacity than the current one).
    fn trim_to_capacity(&mut self, limits: LeaderboardLimits) {
        let excess = self.amts.len() - limits.capacity;
        for e in sorter::weakest(&self.amts, excess) {
            self.amts.remove(&e.id);
            self.txs.remove(&e.id);
        }
        self.threshold.clear();
    }
}
