#![warn(missing_docs)]
//! Layered item containers, the registry that names them, and descriptor lookup.

mod container;
mod error;
mod grid;
mod lookup;
mod presentation;
mod registry;

use std::sync::Arc;

use mdinventory_core::{IdentityCache, ItemDescriptor, ItemFactory, ItemInstance, Materializer};
use tracing::debug;

pub use container::LayeredContainer;
pub use error::InventoryError;
pub use grid::{GridFingerprint, RenderedGrid};
pub use lookup::find_descriptor_for_instance;
pub use presentation::{Audience, PresentationSurface, TextSurface, ROW_WIDTH};
pub use registry::ContainerRegistry;

/// One registry plus the materializer its containers are built with.
///
/// Hosts typically create a single `Inventories` at startup and share it
/// (for example behind an `Arc`) with every request handler.
#[derive(Debug, Default)]
pub struct Inventories {
    registry: ContainerRegistry,
    materializer: Materializer,
}

impl Inventories {
    /// Context with an empty registry, a fresh identity cache and `factory`.
    pub fn new(factory: impl ItemFactory + 'static) -> Self {
        Self::with_parts(ContainerRegistry::new(), Materializer::new(factory))
    }

    /// Context from existing parts.
    pub fn with_parts(registry: ContainerRegistry, materializer: Materializer) -> Self {
        Self {
            registry,
            materializer,
        }
    }

    /// Container registry.
    pub fn registry(&self) -> &ContainerRegistry {
        &self.registry
    }

    /// Materializer used for descriptors.
    pub fn materializer(&self) -> &Materializer {
        &self.materializer
    }

    /// Identity cache behind the materializer.
    pub fn identities(&self) -> &IdentityCache {
        self.materializer.identities()
    }

    /// Create a new, unregistered container.
    pub fn create(
        &self,
        name: impl Into<String>,
        capacity: usize,
    ) -> Result<Arc<LayeredContainer>, InventoryError> {
        LayeredContainer::new(name, capacity).map(Arc::new)
    }

    /// Registered container by name.
    pub fn container(&self, name: &str) -> Option<Arc<LayeredContainer>> {
        self.registry.get(name)
    }

    /// Render the registered container `name`.
    pub fn render(&self, name: &str) -> Result<RenderedGrid, InventoryError> {
        self.registry
            .get(name)
            .ok_or_else(|| InventoryError::UnknownContainer(name.to_string()))?
            .render(&self.registry)
    }

    /// Descriptor that produced `instance`, searched across registered containers.
    pub fn find_descriptor_for_instance(&self, instance: &ItemInstance) -> Option<ItemDescriptor> {
        find_descriptor_for_instance(&self.registry, self.identities(), instance)
    }

    /// Render the registered container `name` and hand it to `surface`.
    pub fn open<S: PresentationSurface + ?Sized>(
        &self,
        name: &str,
        surface: &S,
        audience: &Audience,
    ) -> Result<(), InventoryError> {
        let grid = self.render(name)?;
        debug!(container = name, audience = %audience.name, "presenting container");
        surface.present(audience, name, &grid)?;
        Ok(())
    }
}
