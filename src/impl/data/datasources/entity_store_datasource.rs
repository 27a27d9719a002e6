use std::collections::HashMap;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tokio::sync::RwLock;

use crate::data::models::store_key_model::StoreKey;

/// Durable key/value storage of serialized entities, provided by the caller.
/// A `put_batch` must be applied atomically.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn get(&self, key: &StoreKey) -> Result<Option<Vec<u8>>, ServerError>;

    /// Values for the keys that exist; absent keys are simply omitted.
    async fn get_batch(
        &self,
        keys: &[StoreKey],
    ) -> Result<HashMap<StoreKey, Vec<u8>>, ServerError>;

    async fn put_batch(&self, values: Vec<(StoreKey, Vec<u8>)>) -> Result<(), ServerError>;
}

/// Process-local `EntityStore`.
#[derive(Debug, Default)]
pub struct MemoryStoreDatasource {
    values: RwLock<HashMap<StoreKey, Vec<u8>>>,
}

impl MemoryStoreDatasource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }
}

#[async_trait]
impl EntityStore for MemoryStoreDatasource {
    async fn get(&self, key: &StoreKey) -> Result<Option<Vec<u8>>, ServerError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn get_batch(
        &self,
        keys: &[StoreKey],
    ) -> Result<HashMap<StoreKey, Vec<u8>>, ServerError> {
        let values = self.values.read().await;
        Ok(keys
            .iter()
            .filter_map(|k| values.get(k).map(|v| (k.clone(), v.clone())))
            .collect())
    }

    async fn put_batch(&self, values: Vec<(StoreKey, Vec<u8>)>) -> Result<(), ServerError> {
        self.values.write().await.extend(values);
        Ok(())
    }
}
