use std::str::FromStr;

use fractic_server_error::ServerError;
use ron::from_str;

use crate::{
    entities::{EngineConfig, DEFAULT_LEADERBOARD_CAPACITY, DEFAULT_THRESHOLD_WINDOW},
    errors::InvalidRon,
};

/// RON form of the engine configuration. Omitted fields take the defaults,
/// e.g. `(threshold_window: 5, committee_capacity: 50)`.
#[derive(Debug, serde_derive::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct EngineConfigModel {
    committee_capacity: usize,
    individual_capacity: usize,
    candidate_capacity: usize,
    rankings_capacity: usize,
    threshold_window: usize,
}

impl Default for EngineConfigModel {
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

impl FromStr for EngineConfigModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_str(s).map_err(|e| InvalidRon::with_debug("EngineConfig", &e))
    }
}

impl Into<EngineConfig> for EngineConfigModel {
    fn into(self) -> EngineConfig {
        EngineConfig {
            committee_capacity: self.committee_capacity,
            individual_capacity: self.individual_capacity,
            candidate_capacity: self.candidate_capacity,
            rankings_capacity: self.rankings_capacity,
            threshold_window: self.threshold_window,
        }
    }
}

impl FromStr for EngineConfig {
    type Err = ServerError;
    /// Parses and validates a RON configuration.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: EngineConfig = EngineConfigModel::from_str(s)?.into();
        config.validate()?;
        Ok(config)
    }
}
