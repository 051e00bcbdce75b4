//! Name-keyed container registry.
//!
//! The registry is an ordinary value: construct one, share it by reference,
//! and every component that needs to resolve container names reads from it.
//! Containers are held by `Arc`; mutating a container obtained from
//! [`ContainerRegistry::get`] mutates the registered one.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::container::LayeredContainer;

/// Thread-safe map from container name to container.
#[derive(Debug, Default)]
pub struct ContainerRegistry {
    table: RwLock<RegistryTable>,
}

#[derive(Debug, Default)]
struct RegistryTable {
    containers: HashMap<String, Registered>,
    next_order: u64,
}

#[derive(Debug)]
struct Registered {
    container: Arc<LayeredContainer>,
    order: u64,
}

impl ContainerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `container` under `name`, replacing (not merging with) any previous entry.
    ///
    /// Returns the replaced container. A replaced entry counts as newly registered
    /// for iteration order.
    pub fn put(
        &self,
        name: impl Into<String>,
        container: Arc<LayeredContainer>,
    ) -> Option<Arc<LayeredContainer>> {
        let name = name.into();
        let mut table = self.write();
        let order = table.next_order;
        table.next_order += 1;
        let replaced = table
            .containers
            .insert(name.clone(), Registered { container, order })
            .map(|previous| previous.container);
        if replaced.is_some() {
            debug!(container = %name, "replaced registered container");
        } else {
            debug!(container = %name, "registered container");
        }
        replaced
    }

    /// Remove the entry for `name`, if any.
    pub fn remove(&self, name: &str) -> Option<Arc<LayeredContainer>> {
        self.write()
            .containers
            .remove(name)
            .map(|entry| entry.container)
    }

    /// Container registered under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<LayeredContainer>> {
        self.read()
            .containers
            .get(name)
            .map(|entry| Arc::clone(&entry.container))
    }

    /// Whether a container is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.read().containers.contains_key(name)
    }

    /// Remove every container.
    pub fn clear_all(&self) {
        self.write().containers.clear();
        debug!("cleared container registry");
    }

    /// Number of registered containers.
    pub fn len(&self) -> usize {
        self.read().containers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.read().containers.is_empty()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.ordered()
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    /// Registered containers in registration order.
    pub fn containers(&self) -> Vec<Arc<LayeredContainer>> {
        self.ordered()
            .into_iter()
            .map(|(_, container)| container)
            .collect()
    }

    fn ordered(&self) -> Vec<(String, Arc<LayeredContainer>)> {
        let table = self.read();
        let mut entries: Vec<_> = table.containers.iter().collect();
        entries.sort_by_key(|(_, entry)| entry.order);
        entries
            .into_iter()
            .map(|(name, entry)| (name.clone(), Arc::clone(&entry.container)))
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryTable> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryTable> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}
