#![warn(missing_docs)]
//! Container pack schema + installation helpers.
//!
//! A pack is a JSON document listing container definitions:
//!
//! ```json
//! { "containers": [
//!     { "name": "ShopBase", "capacity": 27, "items": [
//!         { "name": "Sword", "material": "IRON_SWORD", "slots": [0] } ] },
//!     { "name": "Shop", "capacity": 27, "base": "ShopBase", "items": [] }
//! ] }
//! ```

mod loader;

pub use loader::{install_pack, pack_from_file, pack_from_str};

use mdinventory_container::InventoryError;
use mdinventory_core::ItemDescriptor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A set of container definitions installed together.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContainerPack {
    /// Container definitions in authoring order.
    #[serde(default)]
    pub containers: Vec<ContainerDefinition>,
}

/// One container as authored in a pack.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContainerDefinition {
    /// Registry name.
    pub name: String,
    /// Slot count; a positive multiple of the row width.
    pub capacity: usize,
    /// Optional base container name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Items in insertion order.
    #[serde(default)]
    pub items: Vec<ItemDescriptor>,
}

/// Errors emitted during pack loading and installation.
#[derive(Debug, Error)]
pub enum PackError {
    /// Wrap IO errors when reading packs.
    #[error("failed to read container pack: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse container pack: {0}")]
    Parse(#[from] serde_json::Error),
    /// The same container name appears twice in one pack.
    #[error("container '{0}' is defined more than once")]
    DuplicateContainer(String),
    /// Capacity is zero or not a whole number of rows.
    #[error("container '{name}' has capacity {capacity}; expected a positive multiple of {row}", row = mdinventory_container::ROW_WIDTH)]
    InvalidCapacity {
        /// Container name.
        name: String,
        /// Authored capacity.
        capacity: usize,
    },
    /// Building a container failed.
    #[error("container '{container}': {source}")]
    Inventory {
        /// Container being built.
        container: String,
        /// Underlying error.
        #[source]
        source: InventoryError,
    },
}
