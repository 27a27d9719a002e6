use serde_derive::{Deserialize, Serialize};

use super::leaderboard::{Leaderboard, RunningTotals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bucket {
    Individual,
    Committee,
    Candidate,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey {
    pub bucket: Bucket,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Individual {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub employer: String,
    pub occupation: String,

    pub total_in_amt: f64,
    pub total_in_txs: u64,
    pub avg_tx_in: f64,
    pub total_out_amt: f64,
    pub total_out_txs: u64,
    pub avg_tx_out: f64,
    pub net_balance: f64,

    /// Money sent, by recipient.
    pub recipients: Leaderboard,
    /// Money received, by sender.
    pub senders: Leaderboard,
}

/// Running ledger of a filing committee for one election cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitteeLedger {
    pub id: String,
    pub party: Option<String>,
    /// Committee type/designation, used to group rankings.
    pub category: Option<String>,

    pub contributions_in_amt: f64,
    pub contributions_in_txs: u64,
    pub avg_contribution_in: f64,
    pub other_receipts_in_amt: f64,
    pub other_receipts_in_txs: u64,
    pub avg_other_receipt_in: f64,
    pub total_incoming_amt: f64,
    pub total_incoming_txs: u64,
    pub avg_incoming: f64,

    pub transfers_amt: f64,
    pub transfers_txs: u64,
    pub avg_transfer: f64,
    pub expenditures_amt: f64,
    pub expenditures_txs: u64,
    pub avg_expenditure: f64,
    pub total_outgoing_amt: f64,
    pub total_outgoing_txs: u64,
    pub avg_outgoing: f64,

    pub net_balance: f64,

    pub top_individuals: Leaderboard,
    /// Registered filers (committees, candidates) contributing to this
    /// committee.
    pub top_committees: Leaderboard,
    pub transfer_recipients: RunningTotals,
    pub top_expenditures: Leaderboard,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub party: Option<String>,

    pub direct_in_amt: f64,
    pub direct_in_txs: u64,
    pub avg_direct_in: f64,
    pub direct_out_amt: f64,
    pub direct_out_txs: u64,
    pub avg_direct_out: f64,
    pub net_balance: f64,

    pub direct_recipients: Leaderboard,
    pub direct_senders: Leaderboard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Individual(Individual),
    Committee(CommitteeLedger),
    Candidate(Candidate),
}

// --

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Individual => "individual",
            Bucket::Committee => "committee",
            Bucket::Candidate => "candidate",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EntityKey {
    pub fn new(bucket: Bucket, id: impl Into<String>) -> Self {
        Self {
            bucket,
            id: id.into(),
        }
    }

    pub fn committee(id: impl Into<String>) -> Self {
        Self::new(Bucket::Committee, id)
    }
}

impl Individual {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl CommitteeLedger {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl Candidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl Entity {
    /// Zero-valued entity of the kind named by the key.
    pub fn empty(key: &EntityKey) -> Self {
        match key.bucket {
            Bucket::Individual => Entity::Individual(Individual::new(&key.id)),
            Bucket::Committee => Entity::Committee(CommitteeLedger::new(&key.id)),
            Bucket::Candidate => Entity::Candidate(Candidate::new(&key.id)),
        }
    }

    pub fn bucket(&self) -> Bucket {
        match self {
            Entity::Individual(_) => Bucket::Individual,
            Entity::Committee(_) => Bucket::Committee,
            Entity::Candidate(_) => Bucket::Candidate,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::Individual(i) => &i.id,
            Entity::Committee(c) => &c.id,
            Entity::Candidate(c) => &c.id,
        }
    }

    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.bucket(), self.id())
    }
}

macro_rules! impl_into_entity {
    ($typ:ty, $variant:ident) => {
        impl From<$typ> for Entity {
            fn from(value: $typ) -> Entity {
                Entity::$variant(value)
            }
        }
    };
}

impl_into_entity!(Individual, Individual);
impl_into_entity!(CommitteeLedger, Committee);
impl_into_entity!(Candidate, Candidate);
