//! Item factories turn descriptors into item instances.
//!
//! [`ItemFactory`] is the seam to the host's item representation.
//! [`StandardItemFactory`] is a self-contained implementation backed by a
//! [`MaterialCatalog`], and [`Materializer`] pairs any factory with the
//! [`IdentityCache`] so materialized descriptors get their identity written back.

use thiserror::Error;
use tracing::debug;

use crate::identity::IdentityCache;
use crate::item::{translate_color_codes, ItemDescriptor, ItemId, ItemInstance, MAX_STACK_AMOUNT};
use crate::material::MaterialCatalog;

/// Material prefix marking a textured player head (`head-<base64 texture>`).
pub const SKULL_PREFIX: &str = "head-";

/// Material used for textured heads.
pub const PLAYER_HEAD: &str = "PLAYER_HEAD";

/// Alternate colour character translated by [`StandardItemFactory`].
pub const DEFAULT_COLOR_CHAR: char = '&';

/// Errors raised while materializing a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterializationError {
    /// The material name does not resolve.
    #[error("unknown material '{0}'")]
    UnknownMaterial(String),
    /// A `head-` material was given without a texture.
    #[error("skull material '{0}' has no texture")]
    MissingSkullTexture(String),
    /// Amount outside `1..=MAX_STACK_AMOUNT`.
    #[error("invalid amount {amount} for '{name}' (expected 1..={max})", max = MAX_STACK_AMOUNT)]
    InvalidAmount {
        /// Descriptor name.
        name: String,
        /// Offending amount.
        amount: u32,
    },
}

/// Produces item instances from descriptors.
///
/// Implementations must be deterministic in the descriptive fields (name, lore,
/// material, amount): equal descriptors produce value-equal instances.
pub trait ItemFactory: Send + Sync {
    /// Build the instance for `descriptor`.
    fn materialize(&self, descriptor: &ItemDescriptor) -> Result<ItemInstance, MaterializationError>;
}

impl<F> ItemFactory for F
where
    F: Fn(&ItemDescriptor) -> Result<ItemInstance, MaterializationError> + Send + Sync,
{
    fn materialize(&self, descriptor: &ItemDescriptor) -> Result<ItemInstance, MaterializationError> {
        self(descriptor)
    }
}

/// Catalog-backed factory with colour code translation and textured heads.
#[derive(Debug, Clone)]
pub struct StandardItemFactory {
    catalog: MaterialCatalog,
    color_char: char,
}

impl Default for StandardItemFactory {
    fn default() -> Self {
        Self::new(MaterialCatalog::standard())
    }
}

impl StandardItemFactory {
    /// Create a factory resolving materials through `catalog`.
    pub fn new(catalog: MaterialCatalog) -> Self {
        Self {
            catalog,
            color_char: DEFAULT_COLOR_CHAR,
        }
    }

    /// Use a different alternate colour character.
    pub fn with_color_char(mut self, color_char: char) -> Self {
        self.color_char = color_char;
        self
    }

    /// Material catalog in use.
    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    fn color(&self, text: &str) -> String {
        translate_color_codes(self.color_char, text)
    }
}

impl ItemFactory for StandardItemFactory {
    fn materialize(&self, descriptor: &ItemDescriptor) -> Result<ItemInstance, MaterializationError> {
        if descriptor.amount == 0 || descriptor.amount > MAX_STACK_AMOUNT {
            return Err(MaterializationError::InvalidAmount {
                name: descriptor.name.clone(),
                amount: descriptor.amount,
            });
        }

        let raw = descriptor.material.trim();
        let instance = match raw.strip_prefix(SKULL_PREFIX) {
            Some(texture) => {
                let texture = texture.trim();
                if texture.is_empty() {
                    return Err(MaterializationError::MissingSkullTexture(raw.to_string()));
                }
                ItemInstance::new(PLAYER_HEAD, descriptor.amount).with_skull_texture(texture)
            }
            None => {
                let material = self
                    .catalog
                    .resolve(raw)
                    .ok_or_else(|| MaterializationError::UnknownMaterial(raw.to_string()))?;
                ItemInstance::new(material, descriptor.amount)
            }
        };

        Ok(instance
            .with_display_name(self.color(&descriptor.name))
            .with_lore(descriptor.lore.iter().map(|line| self.color(line)).collect()))
    }
}

/// An item factory paired with the identity cache it resolves against.
pub struct Materializer {
    factory: Box<dyn ItemFactory>,
    identities: IdentityCache,
}

impl std::fmt::Debug for Materializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Materializer")
            .field("identities", &self.identities.len())
            .finish_non_exhaustive()
    }
}

impl Default for Materializer {
    fn default() -> Self {
        Self::new(StandardItemFactory::default())
    }
}

impl Materializer {
    /// Wrap `factory` with a fresh identity cache.
    pub fn new(factory: impl ItemFactory + 'static) -> Self {
        Self::with_identities(factory, IdentityCache::new())
    }

    /// Wrap `factory` with an existing identity cache.
    pub fn with_identities(factory: impl ItemFactory + 'static, identities: IdentityCache) -> Self {
        Self {
            factory: Box::new(factory),
            identities,
        }
    }

    /// Identity cache used for resolution.
    pub fn identities(&self) -> &IdentityCache {
        &self.identities
    }

    /// Materialize `descriptor`, resolve its identity and write it back.
    ///
    /// On error neither the descriptor nor the cache is modified.
    pub fn materialize(
        &self,
        descriptor: &mut ItemDescriptor,
    ) -> Result<(ItemInstance, ItemId), MaterializationError> {
        let instance = self.factory.materialize(descriptor)?;
        let id = self.identities.resolve_id(&instance);
        if descriptor.identity != Some(id) {
            debug!(name = %descriptor.name, %id, "descriptor identity resolved");
        }
        descriptor.identity = Some(id);
        Ok((instance, id))
    }

    /// Build the instance for `descriptor` without touching the identity cache.
    pub fn instance_for(&self, descriptor: &ItemDescriptor) -> Result<ItemInstance, MaterializationError> {
        self.factory.materialize(descriptor)
    }
}
