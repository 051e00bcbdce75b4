//! Item descriptors, materialized item instances and their identities.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Largest amount a single materialized item may carry.
pub const MAX_STACK_AMOUNT: u32 = 64;

/// Section sign used by the host client for colour and format codes.
const SECTION_SIGN: char = '\u{00A7}';

/// Codes accepted after the alternate colour character.
const COLOR_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// Stable numeric identity assigned to a materialized item.
///
/// Identities start at zero and only ever increase within one
/// [`IdentityCache`](crate::IdentityCache).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ItemId(pub u64);

impl ItemId {
    /// First identity handed out by a fresh cache.
    pub const ZERO: Self = Self(0);

    /// The identity following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declarative description of an item and the slots it should occupy.
///
/// Two descriptors are separate records even when every field matches.
/// `identity` stays `None` until the descriptor has been materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    /// Display name (may contain `&` colour codes).
    pub name: String,
    /// Lore lines in display order.
    #[serde(default)]
    pub lore: Vec<String>,
    /// Material kind, resolved by the item factory (e.g. `IRON_SWORD`).
    pub material: String,
    /// Item amount.
    #[serde(default = "default_amount")]
    pub amount: u32,
    /// Target slots. Signed so that negative input can be reported instead of wrapped.
    pub slots: BTreeSet<i32>,
    /// Identity of the materialized instance, written back on materialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<ItemId>,
}

fn default_amount() -> u32 {
    1
}

impl Default for ItemDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            lore: Vec::new(),
            material: String::new(),
            amount: default_amount(),
            slots: BTreeSet::new(),
            identity: None,
        }
    }
}

impl ItemDescriptor {
    /// Create a descriptor with an amount of one and no slots.
    pub fn new(name: impl Into<String>, material: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            material: material.into(),
            ..Self::default()
        }
    }

    /// Start a fluent builder with default values.
    pub fn builder() -> ItemDescriptorBuilder {
        ItemDescriptorBuilder::default()
    }

    /// Whether `other` describes the same item at the same slots.
    ///
    /// The identity is ignored: a caller's copy may not have been materialized yet.
    pub fn same_definition(&self, other: &ItemDescriptor) -> bool {
        self.name == other.name
            && self.lore == other.lore
            && self.material == other.material
            && self.amount == other.amount
            && self.slots == other.slots
    }
}

/// Fluent builder for [`ItemDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct ItemDescriptorBuilder {
    descriptor: ItemDescriptor,
}

impl ItemDescriptorBuilder {
    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.descriptor.name = name.into();
        self
    }

    /// Replace the lore.
    pub fn lore<I, S>(mut self, lore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.descriptor.lore = lore.into_iter().map(Into::into).collect();
        self
    }

    /// Append a single lore line.
    pub fn lore_line(mut self, line: impl Into<String>) -> Self {
        self.descriptor.lore.push(line.into());
        self
    }

    /// Set the material kind.
    pub fn material(mut self, material: impl Into<String>) -> Self {
        self.descriptor.material = material.into();
        self
    }

    /// Set the amount.
    pub fn amount(mut self, amount: u32) -> Self {
        self.descriptor.amount = amount;
        self
    }

    /// Add one target slot.
    pub fn slot(mut self, slot: i32) -> Self {
        self.descriptor.slots.insert(slot);
        self
    }

    /// Replace the target slots. Duplicates collapse.
    pub fn slots<I: IntoIterator<Item = i32>>(mut self, slots: I) -> Self {
        self.descriptor.slots = slots.into_iter().collect();
        self
    }

    /// Finish the descriptor.
    pub fn build(self) -> ItemDescriptor {
        self.descriptor
    }
}

/// A materialized item, compared by value.
///
/// Equality and hashing cover the descriptive fields only; the slots and the
/// identity of the descriptor that produced an instance are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemInstance {
    material: String,
    amount: u32,
    display_name: String,
    lore: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    skull_texture: Option<String>,
}

impl ItemInstance {
    /// Create a bare instance with no name or lore.
    pub fn new(material: impl Into<String>, amount: u32) -> Self {
        Self {
            material: material.into(),
            amount,
            display_name: String::new(),
            lore: Vec::new(),
            skull_texture: None,
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Set the lore lines.
    pub fn with_lore(mut self, lore: Vec<String>) -> Self {
        self.lore = lore;
        self
    }

    /// Attach a base64 skull texture.
    pub fn with_skull_texture(mut self, texture: impl Into<String>) -> Self {
        self.skull_texture = Some(texture.into());
        self
    }

    /// Canonical material name.
    pub fn material(&self) -> &str {
        &self.material
    }

    /// Item amount.
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Display name as shown to the audience (colour codes translated).
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Lore lines as shown to the audience.
    pub fn lore(&self) -> &[String] {
        &self.lore
    }

    /// Skull texture, for player heads.
    pub fn skull_texture(&self) -> Option<&str> {
        self.skull_texture.as_deref()
    }

    /// Display name with colour and format codes removed.
    pub fn plain_name(&self) -> String {
        strip_color_codes(&self.display_name)
    }
}

/// Translate `alt`-prefixed colour codes (e.g. `&a`) into section-sign codes.
///
/// Characters that are not followed by a valid code are left untouched.
pub fn translate_color_codes(alt: char, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&code) if c == alt && COLOR_CODES.contains(code) => {
                out.push(SECTION_SIGN);
                out.push(code.to_ascii_lowercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

fn strip_color_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == SECTION_SIGN {
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}
