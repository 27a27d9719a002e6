use std::collections::BTreeMap;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use log::info;

use crate::{
    domain::{logic::orchestrator::UpdateEngine, repositories::entity_repository::EntityRepository},
    entities::{BatchReport, ElectionCycle, EntityCache, Transaction},
};

#[async_trait]
pub trait ProcessBatchUsecase: Send + Sync {
    /// Applies the batch and persists every touched entity. Nothing is
    /// persisted unless every transaction of the batch applies cleanly.
    async fn process(&self, transactions: &[Transaction]) -> Result<BatchReport, ServerError>;
}

pub(crate) struct ProcessBatchUsecaseImpl<R: EntityRepository> {
    repository: R,
    engine: UpdateEngine,
}

#[async_trait]
impl<R: EntityRepository> ProcessBatchUsecase for ProcessBatchUsecaseImpl<R> {
    async fn process(&self, transactions: &[Transaction]) -> Result<BatchReport, ServerError> {
        let mut report = BatchReport::default();
        let mut caches: Vec<EntityCache> = Vec::new();
        for (cycle, txs) in group_by_cycle(transactions) {
            let mut cache = self.repository.load_cache(cycle, &txs).await?;
            let cycle_report = self.engine.apply_all(&mut cache, &txs)?;
            report.cycles.push(cycle);
            report.applied += cycle_report.applied;
            report.memos += cycle_report.memos;
            report.earmarks += cycle_report.earmarks;
            caches.push(cache);
        }
        report.entities_written = self.repository.persist_caches(caches).await?;
        info!(
            "batch of {} transactions applied across {} cycle(s)",
            report.applied,
            report.cycles.len()
        );
        Ok(report)
    }
}

impl<R: EntityRepository> ProcessBatchUsecaseImpl<R> {
    pub(crate) fn new(engine: UpdateEngine, repository: R) -> Self {
        Self { repository, engine }
    }
}

/// Splits the batch by election cycle, keeping the original order within
/// each cycle.
fn group_by_cycle(transactions: &[Transaction]) -> BTreeMap<ElectionCycle, Vec<Transaction>> {
    let mut groups: BTreeMap<ElectionCycle, Vec<Transaction>> = BTreeMap::new();
    for tx in transactions {
        groups.entry(tx.cycle()).or_default().push(tx.clone());
    }
    groups
}
