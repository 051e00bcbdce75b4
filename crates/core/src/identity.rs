//! Identity cache mapping value-equal item instances to stable ids.
//!
//! Instances are keyed by their descriptive fields, so two independently
//! materialized but identical items resolve to the same [`ItemId`] in O(1)
//! on average. Entries are only evicted through [`IdentityCache::remove`].

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

use crate::item::{ItemId, ItemInstance};

/// Thread-safe two-way map between item instances and their identities.
#[derive(Debug, Default)]
pub struct IdentityCache {
    table: RwLock<IdentityTable>,
}

#[derive(Debug, Default)]
struct IdentityTable {
    by_id: HashMap<ItemId, ItemInstance>,
    by_instance: HashMap<ItemInstance, ItemId>,
    next: ItemId,
}

impl IdentityCache {
    /// Create an empty cache whose first id is [`ItemId::ZERO`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of a value-equal instance, allocating the next id if none exists.
    pub fn resolve_id(&self, instance: &ItemInstance) -> ItemId {
        if let Some(id) = self.read().by_instance.get(instance) {
            return *id;
        }

        let mut table = self.write();
        // Another writer may have won the race between the two locks.
        if let Some(id) = table.by_instance.get(instance) {
            return *id;
        }
        let id = table.next;
        table.next = id.next();
        table.by_instance.insert(instance.clone(), id);
        table.by_id.insert(id, instance.clone());
        trace!(%id, material = instance.material(), "allocated item identity");
        id
    }

    /// Id of a value-equal instance, without allocating.
    pub fn id_of(&self, instance: &ItemInstance) -> Option<ItemId> {
        self.read().by_instance.get(instance).copied()
    }

    /// Instance registered under `id`.
    pub fn lookup(&self, id: ItemId) -> Option<ItemInstance> {
        self.read().by_id.get(&id).cloned()
    }

    /// Evict `id`. Containers that still bind the instance are not touched.
    pub fn remove(&self, id: ItemId) -> Option<ItemInstance> {
        let mut table = self.write();
        let instance = table.by_id.remove(&id)?;
        table.by_instance.remove(&instance);
        trace!(%id, "evicted item identity");
        Some(instance)
    }

    /// Copy of every `(id, instance)` pair, ordered by id.
    pub fn snapshot(&self) -> Vec<(ItemId, ItemInstance)> {
        let table = self.read();
        let mut entries: Vec<_> = table
            .by_id
            .iter()
            .map(|(id, instance)| (*id, instance.clone()))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }

    /// Number of cached identities.
    pub fn len(&self) -> usize {
        self.read().by_id.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.read().by_id.is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, IdentityTable> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IdentityTable> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}
