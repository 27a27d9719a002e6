use super::entity::{Bucket, EntityKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Incoming,
    Outgoing,
}

/// Economic reading of a transaction from the point of view of its
/// (effective) filer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Committee whose ledger records the transaction. Differs from the
    /// reported filer for re-routed earmarks.
    pub filer_id: String,
    /// Resolved counterparty id (synthetic for unregistered parties).
    pub counterparty_id: String,
    pub counterparty_bucket: Bucket,
    pub direction: Direction,
    pub is_transfer: bool,
    pub is_memo: bool,
    pub is_earmark: bool,
}

// --

impl Classification {
    pub fn is_incoming(&self) -> bool {
        self.direction == Direction::Incoming
    }

    pub fn filer_key(&self) -> EntityKey {
        EntityKey::committee(&self.filer_id)
    }

    pub fn counterparty_key(&self) -> EntityKey {
        EntityKey::new(self.counterparty_bucket, &self.counterparty_id)
    }
}
