use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use mdinventory_container::{Inventories, LayeredContainer, ROW_WIDTH};
use tracing::{debug, info};

use crate::{ContainerDefinition, ContainerPack, PackError};

/// Load a container pack from the provided JSON file path.
pub fn pack_from_file(path: &Path) -> Result<ContainerPack, PackError> {
    let data = fs::read_to_string(path)?;
    pack_from_str(&data)
}

/// Load a container pack from an in-memory JSON string.
pub fn pack_from_str(input: &str) -> Result<ContainerPack, PackError> {
    Ok(serde_json::from_str(input)?)
}

/// Build every container in `pack` and register it with `inventories`.
///
/// All containers are built before any is saved, so a bad definition leaves
/// the registry untouched. Returns the installed names in pack order.
pub fn install_pack(inventories: &Inventories, pack: &ContainerPack) -> Result<Vec<String>, PackError> {
    let mut seen = HashSet::new();
    for def in &pack.containers {
        if !seen.insert(def.name.as_str()) {
            return Err(PackError::DuplicateContainer(def.name.clone()));
        }
        if def.capacity == 0 || def.capacity % ROW_WIDTH != 0 {
            return Err(PackError::InvalidCapacity {
                name: def.name.clone(),
                capacity: def.capacity,
            });
        }
    }

    let built = pack
        .containers
        .iter()
        .map(|def| build_container(inventories, def))
        .collect::<Result<Vec<_>, _>>()?;

    let mut names = Vec::with_capacity(built.len());
    for container in built {
        if container.save(inventories.registry()).is_some() {
            debug!(container = container.name(), "pack replaced existing container");
        }
        names.push(container.name().to_string());
    }
    info!(containers = names.len(), "installed container pack");
    Ok(names)
}

fn build_container(
    inventories: &Inventories,
    def: &ContainerDefinition,
) -> Result<Arc<LayeredContainer>, PackError> {
    let wrap = |source| PackError::Inventory {
        container: def.name.clone(),
        source,
    };
    let container = inventories.create(def.name.clone(), def.capacity).map_err(wrap)?;
    container.set_base(def.base.clone());
    for item in &def.items {
        let mut descriptor = item.clone();
        // Identities are assigned at materialization, never authored.
        descriptor.identity = None;
        container
            .add_descriptor(inventories.materializer(), &mut descriptor)
            .map_err(wrap)?;
    }
    Ok(container)
}
