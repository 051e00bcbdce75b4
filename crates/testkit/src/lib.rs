#![warn(missing_docs)]
//! Shared fixtures, golden snapshots and render metrics for tests and the CLI.

mod metrics;
mod snapshot;

use anyhow::Result;
use mdinventory_container::{Inventories, RenderedGrid};
use mdinventory_core::{ItemDescriptor, StandardItemFactory};
use serde::Serialize;

pub use metrics::*;
pub use snapshot::*;

/// Descriptor with an amount of one at the given slots.
pub fn descriptor(name: &str, material: &str, slots: &[i32]) -> ItemDescriptor {
    ItemDescriptor::builder()
        .name(name)
        .material(material)
        .slots(slots.iter().copied())
        .build()
}

/// The two-layer shop used throughout the tests.
///
/// `ShopBase` (27 slots) holds a Sword at slot 0; `Shop` (27 slots, base
/// `ShopBase`) holds a Shield at slot 0. Both are registered.
pub fn shop_inventories() -> Result<Inventories> {
    let inventories = Inventories::new(StandardItemFactory::default());

    let base = inventories.create("ShopBase", 27)?;
    base.add_descriptor(
        inventories.materializer(),
        &mut descriptor("Sword", "IRON_SWORD", &[0]),
    )?;
    base.save(inventories.registry());

    let shop = inventories.create("Shop", 27)?;
    shop.set_base(Some("ShopBase".into()));
    shop.add_descriptor(
        inventories.materializer(),
        &mut descriptor("Shield", "SHIELD", &[0]),
    )?;
    shop.save(inventories.registry());

    Ok(inventories)
}

/// Compact, snapshot-friendly view of a rendered grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridSummary {
    /// Container name.
    pub container: String,
    /// Slot count.
    pub capacity: usize,
    /// Occupied cells in slot order.
    pub cells: Vec<CellSummary>,
}

/// One occupied cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellSummary {
    /// Slot index.
    pub slot: usize,
    /// Display name without colour codes.
    pub item: String,
    /// Canonical material.
    pub material: String,
    /// Amount.
    pub amount: u32,
}

impl GridSummary {
    /// Summarize `grid` under `container`.
    pub fn of(container: &str, grid: &RenderedGrid) -> Self {
        Self {
            container: container.to_string(),
            capacity: grid.capacity(),
            cells: grid
                .occupied()
                .map(|(slot, item)| CellSummary {
                    slot,
                    item: item.plain_name(),
                    material: item.material().to_string(),
                    amount: item.amount(),
                })
                .collect(),
        }
    }
}
