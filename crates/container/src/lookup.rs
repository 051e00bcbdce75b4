//! Recover the descriptor that produced an item instance.

use mdinventory_core::{IdentityCache, ItemDescriptor, ItemInstance};

use crate::registry::ContainerRegistry;

/// Find the descriptor whose materialized instance is value-equal to `instance`.
///
/// The instance's identity comes from `identities`; registered containers are
/// then scanned in registration order and the first descriptor carrying that
/// identity is returned. An instance the cache has never seen cannot be bound
/// anywhere, so the probe does not allocate an id for it.
pub fn find_descriptor_for_instance(
    registry: &ContainerRegistry,
    identities: &IdentityCache,
    instance: &ItemInstance,
) -> Option<ItemDescriptor> {
    let id = identities.id_of(instance)?;
    registry
        .containers()
        .iter()
        .find_map(|container| container.find_descriptor_by_identity(id))
}
