use std::sync::Arc;

use fractic_server_error::ServerError;

use crate::{
    data::{
        datasources::entity_store_datasource::EntityStore,
        repositories::entity_repository_impl::EntityRepositoryImpl,
    },
    domain::{
        logic::orchestrator::UpdateEngine,
        repositories::entity_repository::EntityRepository as _,
        usecases::process_batch_usecase::{ProcessBatchUsecase as _, ProcessBatchUsecaseImpl},
    },
    entities::{
        BatchReport, Bucket, CommitteeLedger, ElectionCycle, EngineConfig, Entity, EntityKey,
        Rankings, Transaction,
    },
    errors::UnexpectedEntityKind,
    presentation::report_printer::ReportPrinter,
};

pub type Report = String;

pub struct CampaignLedgerUtil<S: EntityStore> {
    process_usecase: ProcessBatchUsecaseImpl<EntityRepositoryImpl<S>>,
    repository: EntityRepositoryImpl<S>,
}

impl<S: EntityStore> CampaignLedgerUtil<S> {
    pub fn new(config: EngineConfig, store: Arc<S>) -> Result<Self, ServerError> {
        let engine = UpdateEngine::new(config)?;
        Ok(Self {
            process_usecase: ProcessBatchUsecaseImpl::new(
                engine,
                EntityRepositoryImpl::new(store.clone()),
            ),
            repository: EntityRepositoryImpl::new(store),
        })
    }

    /// Same as `new`, with the configuration given in RON, e.g.
    /// `(threshold_window: 5, committee_capacity: 50)`.
    pub fn from_ron_config(config: &str, store: Arc<S>) -> Result<Self, ServerError> {
        Self::new(config.parse()?, store)
    }

    /// Applies the batch and persists the result. If any transaction fails,
    /// the error is returned and nothing is persisted.
    pub async fn process_batch(
        &self,
        transactions: &[Transaction],
    ) -> Result<BatchReport, ServerError> {
        self.process_usecase.process(transactions).await
    }

    pub async fn entity(
        &self,
        cycle: ElectionCycle,
        key: &EntityKey,
    ) -> Result<Option<Entity>, ServerError> {
        self.repository.load_entity(cycle, key).await
    }

    pub async fn committee(
        &self,
        cycle: ElectionCycle,
        id: &str,
    ) -> Result<Option<CommitteeLedger>, ServerError> {
        match self.entity(cycle, &EntityKey::committee(id)).await? {
            None => Ok(None),
            Some(Entity::Committee(c)) => Ok(Some(c)),
            Some(other) => Err(UnexpectedEntityKind::new(
                id,
                Bucket::Committee.as_str(),
                other.bucket().as_str(),
            )),
        }
    }

    pub async fn rankings(&self, cycle: ElectionCycle) -> Result<Rankings, ServerError> {
        self.repository.load_rankings(cycle).await
    }

    /// Totals and the `top_n` strongest entries of each leaderboard of a
    /// committee, or `None` if the committee has no ledger for the cycle.
    pub async fn committee_report(
        &self,
        cycle: ElectionCycle,
        id: &str,
        top_n: usize,
    ) -> Result<Option<Report>, ServerError> {
        Ok(self
            .committee(cycle, id)
            .await?
            .map(|c| ReportPrinter::new(top_n).print_committee(&c)))
    }

    pub async fn rankings_report(
        &self,
        cycle: ElectionCycle,
        top_n: usize,
    ) -> Result<Report, ServerError> {
        let rankings = self.rankings(cycle).await?;
        Ok(ReportPrinter::new(top_n).print_rankings(&rankings))
    }
}
