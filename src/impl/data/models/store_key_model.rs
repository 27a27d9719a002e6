use crate::entities::{ElectionCycle, EntityKey};

const RANKINGS_CATEGORY: &str = "rankings";
const RANKINGS_ID: &str = "ALL";

/// Storage address of a persisted value: `(cycle, category, id)`, where the
/// category is an entity bucket or the cycle's rankings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreKey {
    pub cycle: ElectionCycle,
    pub category: String,
    pub id: String,
}

impl StoreKey {
    pub fn entity(cycle: ElectionCycle, key: &EntityKey) -> Self {
        Self {
            cycle,
            category: key.bucket.as_str().to_string(),
            id: key.id.clone(),
        }
    }

    pub fn rankings(cycle: ElectionCycle) -> Self {
        Self {
            cycle,
            category: RANKINGS_CATEGORY.to_string(),
            id: RANKINGS_ID.to_string(),
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.cycle, self.category, self.id)
    }
}
