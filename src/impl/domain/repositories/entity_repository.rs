use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{ElectionCycle, Entity, EntityCache, EntityKey, Rankings, Transaction};

#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// Resolves every entity the transactions of one cycle can touch,
    /// creating zero-valued entities for the ones not stored yet.
    async fn load_cache(
        &self,
        cycle: ElectionCycle,
        transactions: &[Transaction],
    ) -> Result<EntityCache, ServerError>;

    /// Writes back every cached entity and the rankings of every cache in a
    /// single store batch. Returns the number of entities written.
    async fn persist_caches(&self, caches: Vec<EntityCache>) -> Result<usize, ServerError>;

    async fn load_entity(
        &self,
        cycle: ElectionCycle,
        key: &EntityKey,
    ) -> Result<Option<Entity>, ServerError>;

    async fn load_rankings(&self, cycle: ElectionCycle) -> Result<Rankings, ServerError>;
}
