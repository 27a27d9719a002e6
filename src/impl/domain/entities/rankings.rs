use std::collections::BTreeMap;

use serde_derive::{Deserialize, Serialize};

use super::{entity::Bucket, leaderboard::Leaderboard};

pub const ALL_GROUP: &str = "ALL";

/// Ranking scope: which kind of entity, and within which group (`ALL`,
/// `party=<code>` or `category=<code>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RankingKey {
    pub bucket: Bucket,
    pub group: String,
}

/// Per-cycle top-K rankings across all entities of the cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rankings {
    #[serde(default)]
    pub boards: BTreeMap<String, Leaderboard>,
}

// --

impl RankingKey {
    pub fn new(bucket: Bucket, group: impl Into<String>) -> Self {
        Self {
            bucket,
            group: group.into(),
        }
    }

    pub fn all(bucket: Bucket) -> Self {
        Self::new(bucket, ALL_GROUP)
    }

    pub fn party(bucket: Bucket, party: &str) -> Self {
        Self::new(bucket, format!("party={}", party))
    }

    pub fn category(bucket: Bucket, category: &str) -> Self {
        Self::new(bucket, format!("category={}", category))
    }

    /// Key under which the leaderboard is stored. Map keys of the serialized
    /// rankings must be strings.
    pub(crate) fn storage_key(&self) -> String {
        format!("{}:{}", self.bucket.as_str(), self.group)
    }
}

impl Rankings {
    pub fn board(&self, key: &RankingKey) -> Option<&Leaderboard> {
        self.boards.get(&key.storage_key())
    }

    pub(crate) fn board_mut(&mut self, key: &RankingKey) -> &mut Leaderboard {
        self.boards.entry(key.storage_key()).or_default()
    }
}
