use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use fractic_server_error::ServerError;
use log::info;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    data::{datasources::entity_store_datasource::EntityStore, models::store_key_model::StoreKey},
    domain::{logic::classifier::Classifier, repositories::entity_repository::EntityRepository},
    entities::{
        Bucket, ElectionCycle, Entity, EntityCache, EntityKey, Rankings, Transaction,
    },
    errors::{EntityDecodeError, EntityEncodeError, UnexpectedEntityKind},
};

pub(crate) struct EntityRepositoryImpl<S: EntityStore> {
    store: Arc<S>,
}

impl<S: EntityStore> EntityRepositoryImpl<S> {
    pub(crate) fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: EntityStore> EntityRepository for EntityRepositoryImpl<S> {
    async fn load_cache(
        &self,
        cycle: ElectionCycle,
        transactions: &[Transaction],
    ) -> Result<EntityCache, ServerError> {
        let seeds = referenced_keys(transactions);
        let keys: Vec<(&EntityKey, StoreKey)> = seeds
            .keys()
            .map(|k| (k, StoreKey::entity(cycle, k)))
            .collect();
        let store_keys: Vec<StoreKey> = keys.iter().map(|(_, sk)| sk.clone()).collect();

        let (stored, rankings) = futures::future::try_join(
            self.store.get_batch(&store_keys),
            self.load_rankings(cycle),
        )
        .await?;

        let mut cache = EntityCache::new(cycle);
        cache.rankings = rankings;
        let mut created = 0;
        for (key, store_key) in keys {
            let entity = match stored.get(&store_key) {
                Some(bytes) => {
                    let entity: Entity = decode(&store_key, bytes)?;
                    if entity.bucket() != key.bucket {
                        return Err(UnexpectedEntityKind::new(
                            &key.id,
                            key.bucket.as_str(),
                            entity.bucket().as_str(),
                        ));
                    }
                    entity
                }
                None => {
                    created += 1;
                    seeded_entity(key, seeds.get(key).copied().flatten())
                }
            };
            cache.insert(entity);
        }

        info!(
            "loaded cache for cycle {}: {} entities ({} new) for {} transactions",
            cycle,
            cache.len(),
            created,
            transactions.len()
        );
        Ok(cache)
    }

    async fn persist_caches(&self, caches: Vec<EntityCache>) -> Result<usize, ServerError> {
        let mut values = Vec::new();
        let mut written = 0;
        let cycles = caches.len();
        for cache in caches {
            let (cycle, entities, rankings) = cache.into_parts();
            for e in &entities {
                let key = StoreKey::entity(cycle, &e.key());
                let bytes = encode(&key, e)?;
                values.push((key, bytes));
            }
            let rankings_key = StoreKey::rankings(cycle);
            let rankings_bytes = encode(&rankings_key, &rankings)?;
            values.push((rankings_key, rankings_bytes));
            written += entities.len();
        }

        self.store.put_batch(values).await?;
        info!("persisted {} entities across {} cycle(s)", written, cycles);
        Ok(written)
    }

    async fn load_entity(
        &self,
        cycle: ElectionCycle,
        key: &EntityKey,
    ) -> Result<Option<Entity>, ServerError> {
        let store_key = StoreKey::entity(cycle, key);
        self.store
            .get(&store_key)
            .await?
            .map(|bytes| decode(&store_key, &bytes))
            .transpose()
    }

    async fn load_rankings(&self, cycle: ElectionCycle) -> Result<Rankings, ServerError> {
        let store_key = StoreKey::rankings(cycle);
        Ok(match self.store.get(&store_key).await? {
            Some(bytes) => decode(&store_key, &bytes)?,
            None => Rankings::default(),
        })
    }
}

/// Every entity key the transactions reference, with the transaction to seed
/// a new individual's identity from (first sighting wins). Transactions that
/// fail classification are left for the engine to report.
fn referenced_keys(transactions: &[Transaction]) -> BTreeMap<EntityKey, Option<&Transaction>> {
    let mut keys = BTreeMap::new();
    for tx in transactions {
        let Ok(classification) = Classifier::classify(tx) else {
            continue;
        };
        keys.entry(classification.filer_key()).or_insert(None);
        let seed = (classification.counterparty_bucket == Bucket::Individual).then_some(tx);
        keys.entry(classification.counterparty_key()).or_insert(seed);
    }
    keys
}

fn seeded_entity(key: &EntityKey, seed: Option<&Transaction>) -> Entity {
    let mut entity = Entity::empty(key);
    if let (Entity::Individual(i), Some(tx)) = (&mut entity, seed) {
        i.name = tx.name.clone();
        i.city = tx.city.clone();
        i.state = tx.state.clone();
        i.zip = tx.zip.clone();
        i.employer = tx.employer.clone();
        i.occupation = tx.occupation.clone();
    }
    entity
}

fn encode<T: Serialize>(key: &StoreKey, value: &T) -> Result<Vec<u8>, ServerError> {
    serde_json::to_vec(value).map_err(|e| EntityEncodeError::with_debug(&key.to_string(), &e))
}

fn decode<T: DeserializeOwned>(key: &StoreKey, bytes: &[u8]) -> Result<T, ServerError> {
    serde_json::from_slice(bytes).map_err(|e| EntityDecodeError::with_debug(&key.to_string(), &e))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        data::datasources::entity_store_datasource::MemoryStoreDatasource,
        entities::{CommitteeLedger, Individual},
    };

    fn cycle() -> ElectionCycle {
        ElectionCycle::new(2024)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, 2).unwrap()
    }

    #[tokio::test]
    async fn test_load_creates_missing_entities_with_identity() {
        let repo = EntityRepositoryImpl::new(Arc::new(MemoryStoreDatasource::new()));
        let tx = Transaction::new("T1", "C1", "", "15", 20.0, date()).with_contributor(
            "Jane Doe",
            "94110",
            "Nurse",
        );
        let cache = repo.load_cache(cycle(), &[tx.clone()]).await.unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.committee("C1").is_some());
        let donor_key = EntityKey::new(
            Bucket::Individual,
            crate::domain::logic::classifier::resolved_counterparty_id(&tx),
        );
        match cache.get(&donor_key) {
            Some(Entity::Individual(i)) => {
                assert_eq!(i.name, "Jane Doe");
                assert_eq!(i.occupation, "Nurse");
            }
            other => panic!("expected seeded individual, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_persist_then_reload_round_trips() {
        let store = Arc::new(MemoryStoreDatasource::new());
        let repo = EntityRepositoryImpl::new(store.clone());
        let mut cache = EntityCache::new(cycle());
        let mut ledger = CommitteeLedger::new("C1");
        ledger.contributions_in_amt = 12.0;
        cache.insert(ledger.clone());
        cache.insert(Individual::new("I1"));

        assert_eq!(repo.persist_caches(vec![cache]).await.unwrap(), 2);
        assert_eq!(store.len().await, 3);

        let loaded = repo
            .load_entity(cycle(), &EntityKey::committee("C1"))
            .await
            .unwrap();
        assert_eq!(loaded, Some(Entity::Committee(ledger)));
        assert!(repo
            .load_entity(ElectionCycle::new(2022), &EntityKey::committee("C1"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_stored_entity_of_wrong_kind_is_rejected() {
        let store = Arc::new(MemoryStoreDatasource::new());
        let key = StoreKey::entity(cycle(), &EntityKey::committee("C1"));
        let bytes = serde_json::to_vec(&Entity::Individual(Individual::new("C1"))).unwrap();
        store.put_batch(vec![(key, bytes)]).await.unwrap();

        let repo = EntityRepositoryImpl::new(store);
        let tx = Transaction::new("T1", "C1", "I1", "15", 1.0, date());
        assert!(repo.load_cache(cycle(), &[tx]).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_leaderboards_decode_as_empty() {
        let store = Arc::new(MemoryStoreDatasource::new());
        let key = StoreKey::entity(cycle(), &EntityKey::committee("C1"));
        let legacy = br#"{"Committee":{"id":"C1","contributions_in_amt":5.0}}"#.to_vec();
        store.put_batch(vec![(key, legacy)]).await.unwrap();

        let repo = EntityRepositoryImpl::new(store);
        let loaded = repo
            .load_entity(cycle(), &EntityKey::committee("C1"))
            .await
            .unwrap();
        let Some(Entity::Committee(c)) = loaded else {
            panic!("expected committee");
        };
        assert_eq!(c.contributions_in_amt, 5.0);
        assert!(c.top_individuals.is_empty());
        assert!(c.top_individuals.threshold.is_empty());
    }
}
