#![warn(missing_docs)]
//! Core item primitives shared across the workspace.

pub mod factory;
pub mod identity;
pub mod item;
pub mod material;

// Re-export commonly used types
pub use factory::{
    ItemFactory, MaterializationError, Materializer, StandardItemFactory, DEFAULT_COLOR_CHAR,
    PLAYER_HEAD, SKULL_PREFIX,
};
pub use identity::IdentityCache;
pub use item::{
    translate_color_codes, ItemDescriptor, ItemDescriptorBuilder, ItemId, ItemInstance,
    MAX_STACK_AMOUNT,
};
pub use material::MaterialCatalog;
