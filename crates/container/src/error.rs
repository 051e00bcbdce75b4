use mdinventory_core::{ItemId, MaterializationError};
use thiserror::Error;

/// Errors raised by container and registry operations.
///
/// Lookup misses are not errors; they surface as `None`.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A descriptor slot is negative or not below the container capacity.
    #[error("slot {slot} is out of range for container '{container}' (capacity {capacity})")]
    InvalidSlot {
        /// Container the descriptor was added to.
        container: String,
        /// Offending slot.
        slot: i32,
        /// Capacity of the container.
        capacity: usize,
    },
    /// Base resolution revisited a container already on the chain.
    #[error("cyclic base reference: {}", .chain.join(" -> "))]
    CyclicBaseReference {
        /// Container names from the rendered container to the repeated one.
        chain: Vec<String>,
    },
    /// Several entries carry the identity an update named.
    #[error("identity {id} is held by {entries} entries in container '{container}'")]
    AmbiguousIdentity {
        /// Container the update was applied to.
        container: String,
        /// Shared identity.
        id: ItemId,
        /// Number of entries carrying it.
        entries: usize,
    },
    /// Containers need at least one slot.
    #[error("container '{name}' must have a positive capacity")]
    InvalidCapacity {
        /// Container name.
        name: String,
    },
    /// A convenience call named a container that is not registered.
    #[error("unknown container '{0}'")]
    UnknownContainer(String),
    /// The item factory rejected a descriptor.
    #[error(transparent)]
    Materialization(#[from] MaterializationError),
    /// A presentation surface failed to display a grid.
    #[error("failed to present container: {0}")]
    Presentation(#[from] std::io::Error),
}
