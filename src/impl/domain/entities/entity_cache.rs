use std::collections::HashMap;

use super::{
    entity::{CommitteeLedger, Entity, EntityKey},
    rankings::Rankings,
    transaction::ElectionCycle,
};

/// Every entity a batch of one election cycle may touch, resolved up front.
/// The engine mutates these in place; the caller persists them afterwards.
#[derive(Debug, Clone)]
pub struct EntityCache {
    pub cycle: ElectionCycle,
    pub(crate) entities: HashMap<EntityKey, Entity>,
    pub rankings: Rankings,
}

/// Outcome of one processed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub cycles: Vec<ElectionCycle>,
    pub applied: usize,
    pub memos: usize,
    pub earmarks: usize,
    pub entities_written: usize,
}

// --

impl EntityCache {
    pub fn new(cycle: ElectionCycle) -> Self {
        Self {
            cycle,
            entities: HashMap::new(),
            rankings: Rankings::default(),
        }
    }

    pub fn insert(&mut self, entity: impl Into<Entity>) {
        let entity = entity.into();
        self.entities.insert(entity.key(), entity);
    }

    pub fn get(&self, key: &EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    pub fn contains(&self, key: &EntityKey) -> bool {
        self.entities.contains_key(key)
    }

    pub fn committee(&self, id: &str) -> Option<&CommitteeLedger> {
        match self.entities.get(&EntityKey::committee(id)) {
            Some(Entity::Committee(c)) => Some(c),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub(crate) fn take(&mut self, key: &EntityKey) -> Option<Entity> {
        self.entities.remove(key)
    }

    pub(crate) fn restore(&mut self, entity: Entity) {
        self.entities.insert(entity.key(), entity);
    }

    pub(crate) fn into_parts(self) -> (ElectionCycle, Vec<Entity>, Rankings) {
        (
            self.cycle,
            self.entities.into_values().collect(),
            self.rankings,
        )
    }
}
