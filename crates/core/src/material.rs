//! Material catalog.
//!
//! Material names are canonical upper-case identifiers (e.g. `IRON_SWORD`).
//! Lookups are forgiving about case, surrounding whitespace, `-`/space
//! separators and an optional `minecraft:` namespace, so authoring
//! `minecraft:iron-sword` resolves to the same entry.

use std::collections::BTreeSet;

/// Namespace accepted (and dropped) in front of a material name.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

const STANDARD_MATERIALS: &[&str] = &[
    "AIR",
    "STONE",
    "DIRT",
    "GRASS_BLOCK",
    "COBBLESTONE",
    "OAK_PLANKS",
    "OAK_LOG",
    "GLASS",
    "GLASS_PANE",
    "BLACK_STAINED_GLASS_PANE",
    "GRAY_STAINED_GLASS_PANE",
    "WHITE_STAINED_GLASS_PANE",
    "CHEST",
    "BARRIER",
    "BOOK",
    "PAPER",
    "NAME_TAG",
    "COMPASS",
    "CLOCK",
    "ARROW",
    "BOW",
    "SHIELD",
    "WOODEN_SWORD",
    "STONE_SWORD",
    "IRON_SWORD",
    "GOLDEN_SWORD",
    "DIAMOND_SWORD",
    "WOODEN_PICKAXE",
    "STONE_PICKAXE",
    "IRON_PICKAXE",
    "DIAMOND_PICKAXE",
    "IRON_AXE",
    "DIAMOND_AXE",
    "IRON_HELMET",
    "IRON_CHESTPLATE",
    "IRON_LEGGINGS",
    "IRON_BOOTS",
    "APPLE",
    "BREAD",
    "COOKED_BEEF",
    "IRON_INGOT",
    "GOLD_INGOT",
    "DIAMOND",
    "EMERALD",
    "REDSTONE",
    "ENDER_PEARL",
    "EXPERIENCE_BOTTLE",
    "PLAYER_HEAD",
];

/// Set of material names an item factory accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialCatalog {
    names: BTreeSet<String>,
}

impl MaterialCatalog {
    /// Catalog with the built-in material list.
    pub fn standard() -> Self {
        Self::from_names(STANDARD_MATERIALS.iter().copied())
    }

    /// Build a catalog from arbitrary names; each name is normalized first.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::default();
        catalog.extend(names);
        catalog
    }

    /// Add one material. Returns `false` if it was already present or normalizes to nothing.
    pub fn insert(&mut self, name: &str) -> bool {
        let normalized = normalize(name);
        if normalized.is_empty() {
            return false;
        }
        self.names.insert(normalized)
    }

    /// Add several materials.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.insert(name.as_ref());
        }
    }

    /// Resolve a possibly sloppy material name to its canonical form.
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        self.names.get(normalize(raw).as_str()).map(String::as_str)
    }

    /// Whether the material resolves.
    pub fn contains(&self, raw: &str) -> bool {
        self.resolve(raw).is_some()
    }

    /// Number of known materials.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Known material names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Normalize a material name: namespace dropped, upper case, `_` separators.
pub fn normalize(raw: &str) -> String {
    let raw = raw.trim();
    let raw = match raw.split_once(':') {
        Some((ns, path)) if ns.trim().eq_ignore_ascii_case(DEFAULT_NAMESPACE) => path.trim(),
        _ => raw,
    };
    raw.chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}
