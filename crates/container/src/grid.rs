//! Rendered slot grids.

use std::fmt;
use std::ops::Index;

use mdinventory_core::ItemInstance;
use serde::Serialize;

/// Fully resolved slot contents of a container, base and overlay combined.
///
/// Grids are derived values: they are rebuilt on every render and never
/// observe later mutations of the container they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedGrid {
    cells: Vec<Option<ItemInstance>>,
}

/// Stable content hash of a [`RenderedGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridFingerprint(pub [u8; 32]);

impl GridFingerprint {
    /// Lower-case hex form.
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl fmt::Display for GridFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl RenderedGrid {
    /// A grid of `capacity` empty cells.
    pub fn empty(capacity: usize) -> Self {
        Self {
            cells: vec![None; capacity],
        }
    }

    /// Number of cells.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Item at `slot`, if the slot exists and is occupied.
    pub fn get(&self, slot: usize) -> Option<&ItemInstance> {
        self.cells.get(slot).and_then(Option::as_ref)
    }

    /// Write `instance` into `slot`, replacing what was there.
    ///
    /// Returns `false` (and writes nothing) when the slot is outside the grid.
    pub(crate) fn set(&mut self, slot: usize, instance: ItemInstance) -> bool {
        match self.cells.get_mut(slot) {
            Some(cell) => {
                *cell = Some(instance);
                true
            }
            None => false,
        }
    }

    /// All cells in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&ItemInstance>)> {
        self.cells.iter().enumerate().map(|(slot, cell)| (slot, cell.as_ref()))
    }

    /// Occupied cells in slot order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &ItemInstance)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(slot, cell)| cell.as_ref().map(|item| (slot, item)))
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Cells split into rows of `width` (the last row may be shorter).
    pub fn rows(&self, width: usize) -> impl Iterator<Item = &[Option<ItemInstance>]> {
        self.cells.chunks(width.max(1))
    }

    /// Hash of the grid contents, stable across runs and platforms.
    pub fn fingerprint(&self) -> GridFingerprint {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.cells.len() as u64).to_le_bytes());
        for (slot, cell) in self.iter() {
            hasher.update(&(slot as u64).to_le_bytes());
            match cell {
                None => {
                    hasher.update(&[0]);
                }
                Some(item) => {
                    hasher.update(&[1]);
                    hash_str(&mut hasher, item.material());
                    hasher.update(&item.amount().to_le_bytes());
                    hash_str(&mut hasher, item.display_name());
                    hasher.update(&(item.lore().len() as u64).to_le_bytes());
                    for line in item.lore() {
                        hash_str(&mut hasher, line);
                    }
                    hash_str(&mut hasher, item.skull_texture().unwrap_or_default());
                }
            }
        }
        GridFingerprint(*hasher.finalize().as_bytes())
    }
}

impl Index<usize> for RenderedGrid {
    type Output = Option<ItemInstance>;

    fn index(&self, slot: usize) -> &Self::Output {
        &self.cells[slot]
    }
}

fn hash_str(hasher: &mut blake3::Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
