use fractic_server_error::ServerError;

use crate::errors::InvalidEngineConfig;

use super::leaderboard::LeaderboardLimits;

pub const DEFAULT_LEADERBOARD_CAPACITY: usize = 100;
pub const DEFAULT_THRESHOLD_WINDOW: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub committee_capacity: usize,
    pub individual_capacity: usize,
    pub candidate_capacity: usize,
    pub rankings_capacity: usize,
    /// Number of weakest members cached by each full leaderboard.
    pub threshold_window: usize,
}

// --

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            committee_capacity: DEFAULT_LEADERBOARD_CAPACITY,
            individual_capacity: DEFAULT_LEADERBOARD_CAPACITY,
            candidate_capacity: DEFAULT_LEADERBOARD_CAPACITY,
            rankings_capacity: DEFAULT_LEADERBOARD_CAPACITY,
            threshold_window: DEFAULT_THRESHOLD_WINDOW,
        }
    }
}

impl EngineConfig {
    /// A window rebuild takes the `threshold_window` weakest members of a full
    /// leaderboard, so every capacity must be at least that large.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.threshold_window == 0 {
            return Err(InvalidEngineConfig::new("threshold_window must be at least 1"));
        }
        for (name, capacity) in [
            ("committee_capacity", self.committee_capacity),
            ("individual_capacity", self.individual_capacity),
            ("candidate_capacity", self.candidate_capacity),
            ("rankings_capacity", self.rankings_capacity),
        ] {
            if capacity < self.threshold_window {
                return Err(InvalidEngineConfig::new(&format!(
                    "{} ({}) is smaller than threshold_window ({})",
                    name, capacity, self.threshold_window
                )));
            }
        }
        Ok(())
    }

    pub fn committee_limits(&self) -> LeaderboardLimits {
        self.limits(self.committee_capacity)
    }

    pub fn individual_limits(&self) -> LeaderboardLimits {
        self.limits(self.individual_capacity)
    }

    pub fn candidate_limits(&self) -> LeaderboardLimits {
        self.limits(self.candidate_capacity)
    }

    pub fn rankings_limits(&self) -> LeaderboardLimits {
        self.limits(self.rankings_capacity)
    }

    fn limits(&self, capacity: usize) -> LeaderboardLimits {
        LeaderboardLimits {
            capacity,
            window: self.threshold_window,
        }
    }
}
