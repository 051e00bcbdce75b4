//! Layered containers.
//!
//! A [`LayeredContainer`] is a named, fixed-capacity slot grid defined by
//! item descriptors. It may name a base container; rendering writes the
//! base's cells first and then overlays its own, so the container's own items
//! win on shared slots.
//!
//! Descriptors and the instances bound from them are stored together as one
//! list of entries behind a single lock, so a reader never observes a binding
//! without its descriptor or the other way round.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mdinventory_core::{ItemDescriptor, ItemId, ItemInstance, Materializer};
use tracing::{debug, trace};

use crate::error::InventoryError;
use crate::grid::RenderedGrid;
use crate::registry::ContainerRegistry;

/// A descriptor together with the instance materialized from it.
#[derive(Debug, Clone)]
struct Entry {
    descriptor: ItemDescriptor,
    instance: ItemInstance,
    slots: Vec<usize>,
}

#[derive(Debug, Default)]
struct ContainerState {
    base: Option<String>,
    entries: Vec<Entry>,
}

/// Named container of item descriptors, optionally layered on a base container.
#[derive(Debug)]
pub struct LayeredContainer {
    name: String,
    capacity: usize,
    state: Mutex<ContainerState>,
}

impl LayeredContainer {
    /// Create an empty container with no base.
    pub fn new(name: impl Into<String>, capacity: usize) -> Result<Self, InventoryError> {
        let name = name.into();
        if capacity == 0 {
            return Err(InventoryError::InvalidCapacity { name });
        }
        Ok(Self {
            name,
            capacity,
            state: Mutex::new(ContainerState::default()),
        })
    }

    /// Set the base container name at construction time.
    pub fn with_base(self, base: impl Into<String>) -> Self {
        self.set_base(Some(base.into()));
        self
    }

    /// Container name (its registry key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Name of the base container, if any.
    pub fn base(&self) -> Option<String> {
        self.lock().base.clone()
    }

    /// Replace the base container name. Cycles are only detected when rendering.
    pub fn set_base(&self, base: Option<String>) {
        self.lock().base = base;
    }

    /// Materialize `descriptor` and bind the instance to its slots.
    ///
    /// The resolved identity is written back into `descriptor` and stored with
    /// the container's copy. Fails without touching the container if a slot is
    /// out of range or the factory rejects the descriptor.
    pub fn add_descriptor(
        &self,
        materializer: &Materializer,
        descriptor: &mut ItemDescriptor,
    ) -> Result<ItemId, InventoryError> {
        let slots = self.validate_slots(descriptor)?;
        let (instance, id) = materializer.materialize(descriptor)?;

        self.lock().entries.push(Entry {
            descriptor: descriptor.clone(),
            instance,
            slots,
        });
        debug!(container = %self.name, item = %descriptor.name, %id, "descriptor added");
        Ok(id)
    }

    /// Unbind the instance produced by `descriptor` and drop the descriptor.
    ///
    /// Returns `Ok(false)` if no matching descriptor was ever added.
    pub fn remove_descriptor(
        &self,
        materializer: &Materializer,
        descriptor: &ItemDescriptor,
    ) -> Result<bool, InventoryError> {
        let instance = materializer.instance_for(descriptor)?;

        let mut state = self.lock();
        let position = state
            .entries
            .iter()
            .position(|entry| entry.instance == instance && entry.descriptor.same_definition(descriptor));
        match position {
            Some(index) => {
                state.entries.remove(index);
                debug!(container = %self.name, item = %descriptor.name, "descriptor removed");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Rebind the entry whose identity matches `descriptor.identity`.
    ///
    /// The old binding is replaced in place by the newly materialized instance
    /// at `descriptor.slots`, and the new identity is written back. Returns
    /// `Ok(false)` when the descriptor has no identity or nothing in this
    /// container carries it. Value-equal descriptors share one identity, so
    /// when several entries carry it the call fails with
    /// [`InventoryError::AmbiguousIdentity`]; use
    /// [`replace_descriptor`](Self::replace_descriptor) to name the entry.
    pub fn update_descriptor(
        &self,
        materializer: &Materializer,
        descriptor: &mut ItemDescriptor,
    ) -> Result<bool, InventoryError> {
        let Some(previous) = descriptor.identity else {
            return Ok(false);
        };
        self.rebind(materializer, descriptor, |entries| {
            let mut holders = entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.descriptor.identity == Some(previous))
                .map(|(index, _)| index);
            match (holders.next(), holders.count()) {
                (None, _) => Ok(None),
                (Some(index), 0) => Ok(Some(index)),
                (Some(_), others) => Err(InventoryError::AmbiguousIdentity {
                    container: self.name.clone(),
                    id: previous,
                    entries: others + 1,
                }),
            }
        })
    }

    /// Rebind the entry that was added as `previous` to `descriptor`.
    ///
    /// `previous` is the descriptor as it was added (or last rebound),
    /// identity included. Returns `Ok(false)` when no entry matches it.
    pub fn replace_descriptor(
        &self,
        materializer: &Materializer,
        previous: &ItemDescriptor,
        descriptor: &mut ItemDescriptor,
    ) -> Result<bool, InventoryError> {
        self.rebind(materializer, descriptor, |entries| {
            Ok(entries.iter().position(|entry| {
                entry.descriptor.identity == previous.identity
                    && entry.descriptor.same_definition(previous)
            }))
        })
    }

    /// Validate and build the new instance, then pick and replace the target
    /// entry under one lock. No identity is allocated unless an entry is replaced.
    fn rebind<F>(
        &self,
        materializer: &Materializer,
        descriptor: &mut ItemDescriptor,
        select: F,
    ) -> Result<bool, InventoryError>
    where
        F: FnOnce(&[Entry]) -> Result<Option<usize>, InventoryError>,
    {
        let slots = self.validate_slots(descriptor)?;
        let instance = materializer.instance_for(descriptor)?;

        let mut state = self.lock();
        let Some(index) = select(state.entries.as_slice())? else {
            return Ok(false);
        };
        // The identity cache lock nests inside the container lock, never the reverse.
        let id = materializer.identities().resolve_id(&instance);
        let mut updated = descriptor.clone();
        updated.identity = Some(id);
        let entry = &mut state.entries[index];
        let from = entry.descriptor.identity;
        *entry = Entry {
            descriptor: updated,
            instance,
            slots,
        };
        drop(state);

        descriptor.identity = Some(id);
        debug!(container = %self.name, item = %descriptor.name, ?from, to = %id, "descriptor rebound");
        Ok(true)
    }

    /// First descriptor (in insertion order) with the given name.
    pub fn find_descriptor_by_name(&self, name: &str) -> Option<ItemDescriptor> {
        self.lock()
            .entries
            .iter()
            .find(|entry| entry.descriptor.name == name)
            .map(|entry| entry.descriptor.clone())
    }

    /// First descriptor (in insertion order) whose identity is `id`.
    pub fn find_descriptor_by_identity(&self, id: ItemId) -> Option<ItemDescriptor> {
        self.lock()
            .entries
            .iter()
            .find(|entry| entry.descriptor.identity == Some(id))
            .map(|entry| entry.descriptor.clone())
    }

    /// Copy of the descriptors in insertion order.
    pub fn descriptors(&self) -> Vec<ItemDescriptor> {
        self.lock()
            .entries
            .iter()
            .map(|entry| entry.descriptor.clone())
            .collect()
    }

    /// Bound instances with their slot sets, in first-bound order.
    ///
    /// Value-equal instances bound by several descriptors are merged into one
    /// entry carrying the union of their slots.
    pub fn bindings(&self) -> Vec<(ItemInstance, BTreeSet<usize>)> {
        let state = self.lock();
        let mut bindings: Vec<(ItemInstance, BTreeSet<usize>)> = Vec::new();
        for entry in &state.entries {
            match bindings.iter_mut().find(|(instance, _)| *instance == entry.instance) {
                Some((_, slots)) => slots.extend(entry.slots.iter().copied()),
                None => bindings.push((entry.instance.clone(), entry.slots.iter().copied().collect())),
            }
        }
        bindings
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Check if the container has no descriptors.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Drop every descriptor and binding. Name, capacity and base are kept.
    pub fn clear(&self) {
        self.lock().entries.clear();
        debug!(container = %self.name, "container cleared");
    }

    /// Register this container under its own name, replacing any previous one.
    ///
    /// Returns the container that was replaced, if there was one.
    pub fn save(self: &Arc<Self>, registry: &ContainerRegistry) -> Option<Arc<LayeredContainer>> {
        registry.put(self.name.clone(), Arc::clone(self))
    }

    /// Resolve the base chain and overlay this container's items onto it.
    ///
    /// A base that is not registered is skipped. Revisiting a container name
    /// along the chain fails with [`InventoryError::CyclicBaseReference`].
    pub fn render(&self, registry: &ContainerRegistry) -> Result<RenderedGrid, InventoryError> {
        let mut grid = RenderedGrid::empty(self.capacity);
        let mut chain = vec![self.name.clone()];
        self.render_into(registry, &mut grid, &mut chain)?;
        Ok(grid)
    }

    fn render_into(
        &self,
        registry: &ContainerRegistry,
        grid: &mut RenderedGrid,
        chain: &mut Vec<String>,
    ) -> Result<(), InventoryError> {
        // Snapshot under the lock, then release it before touching the base so
        // that two renders never hold two container locks at once.
        let (base, layer) = {
            let state = self.lock();
            (state.base.clone(), state.entries.clone())
        };

        if let Some(base_name) = base {
            if chain.contains(&base_name) {
                chain.push(base_name);
                return Err(InventoryError::CyclicBaseReference {
                    chain: std::mem::take(chain),
                });
            }
            match registry.get(&base_name) {
                Some(base_container) => {
                    chain.push(base_name);
                    base_container.render_into(registry, grid, chain)?;
                }
                None => {
                    trace!(container = %self.name, base = %base_name, "base not registered, skipping layer");
                }
            }
        }

        for entry in layer {
            for &slot in &entry.slots {
                grid.set(slot, entry.instance.clone());
            }
        }
        Ok(())
    }

    fn validate_slots(&self, descriptor: &ItemDescriptor) -> Result<Vec<usize>, InventoryError> {
        descriptor
            .slots
            .iter()
            .map(|&slot| match usize::try_from(slot) {
                Ok(index) if index < self.capacity => Ok(index),
                _ => Err(InventoryError::InvalidSlot {
                    container: self.name.clone(),
                    slot,
                    capacity: self.capacity,
                }),
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, ContainerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdinventory_core::MaterializationError;

    fn item(name: &str, material: &str, slots: &[i32]) -> ItemDescriptor {
        ItemDescriptor::builder()
            .name(name)
            .material(material)
            .slots(slots.iter().copied())
            .build()
    }

    fn container(name: &str) -> Arc<LayeredContainer> {
        Arc::new(LayeredContainer::new(name, 27).expect("capacity"))
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            LayeredContainer::new("Empty", 0),
            Err(InventoryError::InvalidCapacity { .. })
        ));
    }

    #[test]
    fn disjoint_descriptors_render_at_their_slots() {
        let materializer = Materializer::default();
        let registry = ContainerRegistry::new();
        let chest = container("Chest");
        let mut sword = item("Sword", "IRON_SWORD", &[0, 8]);
        let mut apple = item("Apple", "APPLE", &[4]);
        chest.add_descriptor(&materializer, &mut sword).expect("sword");
        chest.add_descriptor(&materializer, &mut apple).expect("apple");

        let grid = chest.render(&registry).expect("render");
        assert_eq!(grid.capacity(), 27);
        assert_eq!(grid.occupied_count(), 3);
        assert_eq!(grid.get(0).map(|i| i.material()), Some("IRON_SWORD"));
        assert_eq!(grid.get(8).map(|i| i.material()), Some("IRON_SWORD"));
        assert_eq!(grid.get(4).map(|i| i.material()), Some("APPLE"));
    }

    #[test]
    fn out_of_range_slot_leaves_container_unchanged() {
        let materializer = Materializer::default();
        let chest = container("Chest");
        let mut ok = item("Sword", "IRON_SWORD", &[0]);
        chest.add_descriptor(&materializer, &mut ok).expect("sword");

        for slots in [&[30][..], &[-1][..], &[1, 27][..]] {
            let mut bad = item("Shield", "SHIELD", slots);
            let err = chest.add_descriptor(&materializer, &mut bad).unwrap_err();
            assert!(matches!(err, InventoryError::InvalidSlot { capacity: 27, .. }));
            assert!(bad.identity.is_none());
        }
        assert_eq!(chest.len(), 1);
        assert_eq!(chest.bindings().len(), 1);
    }

    #[test]
    fn factory_failure_is_all_or_nothing() {
        let materializer = Materializer::default();
        let chest = container("Chest");
        let mut bad = item("Rock", "MOON_ROCK", &[0]);
        let err = chest.add_descriptor(&materializer, &mut bad).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::Materialization(MaterializationError::UnknownMaterial(_))
        ));
        assert!(chest.is_empty());
        assert!(chest.bindings().is_empty());
        assert!(materializer.identities().is_empty());
    }

    #[test]
    fn remove_unbinds_slots() {
        let materializer = Materializer::default();
        let registry = ContainerRegistry::new();
        let chest = container("Chest");
        let mut sword = item("Sword", "IRON_SWORD", &[0, 1]);
        let mut apple = item("Apple", "APPLE", &[2]);
        chest.add_descriptor(&materializer, &mut sword).expect("sword");
        chest.add_descriptor(&materializer, &mut apple).expect("apple");

        assert!(chest.remove_descriptor(&materializer, &sword).expect("remove"));
        let grid = chest.render(&registry).expect("render");
        assert!(grid.get(0).is_none());
        assert!(grid.get(1).is_none());
        assert!(grid.get(2).is_some());
        assert_eq!(chest.descriptors(), vec![apple]);
    }

    #[test]
    fn removing_unknown_descriptor_is_a_noop() {
        let materializer = Materializer::default();
        let chest = container("Chest");
        let never_added = item("Sword", "IRON_SWORD", &[0]);
        assert!(!chest.remove_descriptor(&materializer, &never_added).expect("noop"));
    }

    #[test]
    fn update_rebinds_by_identity() {
        let materializer = Materializer::default();
        let registry = ContainerRegistry::new();
        let chest = container("Chest");
        let mut sword = item("Sword", "IRON_SWORD", &[0]);
        let mut apple = item("Apple", "APPLE", &[1]);
        let old_id = chest.add_descriptor(&materializer, &mut sword).expect("sword");
        chest.add_descriptor(&materializer, &mut apple).expect("apple");

        sword.material = "DIAMOND_SWORD".into();
        sword.slots = [5].into_iter().collect();
        assert!(chest.update_descriptor(&materializer, &mut sword).expect("update"));
        assert_ne!(sword.identity, Some(old_id));

        let grid = chest.render(&registry).expect("render");
        assert!(grid.get(0).is_none());
        assert_eq!(grid.get(5).map(|i| i.material()), Some("DIAMOND_SWORD"));
        let names: Vec<_> = chest.descriptors().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Sword", "Apple"]);
    }

    #[test]
    fn update_without_known_identity_is_a_noop() {
        let materializer = Materializer::default();
        let chest = container("Chest");
        let mut fresh = item("Sword", "IRON_SWORD", &[0]);
        assert!(!chest.update_descriptor(&materializer, &mut fresh).expect("noop"));

        fresh.identity = Some(ItemId(99));
        assert!(!chest.update_descriptor(&materializer, &mut fresh).expect("noop"));
        assert!(chest.is_empty());
        assert!(materializer.identities().is_empty());
    }

    #[test]
    fn update_rejects_bad_slots_without_mutation() {
        let materializer = Materializer::default();
        let chest = container("Chest");
        let mut sword = item("Sword", "IRON_SWORD", &[0]);
        chest.add_descriptor(&materializer, &mut sword).expect("sword");

        let mut moved = sword.clone();
        moved.slots = [40].into_iter().collect();
        assert!(matches!(
            chest.update_descriptor(&materializer, &mut moved),
            Err(InventoryError::InvalidSlot { slot: 40, .. })
        ));
        assert_eq!(chest.descriptors(), vec![sword]);
    }

    fn panes(chest: &LayeredContainer, materializer: &Materializer) -> (ItemDescriptor, ItemDescriptor) {
        let mut left = item("Pane", "GLASS_PANE", &[0]);
        let mut right = item("Pane", "GLASS_PANE", &[8]);
        chest.add_descriptor(materializer, &mut left).expect("left");
        chest.add_descriptor(materializer, &mut right).expect("right");
        assert_eq!(left.identity, right.identity);
        (left, right)
    }

    fn occupied(chest: &LayeredContainer) -> Vec<usize> {
        chest
            .render(&ContainerRegistry::new())
            .expect("render")
            .occupied()
            .map(|(slot, _)| slot)
            .collect()
    }

    #[test]
    fn update_with_shared_identity_is_ambiguous() {
        let materializer = Materializer::default();
        let chest = container("Chest");
        let (left, right) = panes(&chest, &materializer);

        let mut moved = right.clone();
        moved.slots = [9].into_iter().collect();
        let err = chest.update_descriptor(&materializer, &mut moved).unwrap_err();
        assert!(matches!(err, InventoryError::AmbiguousIdentity { entries: 2, .. }));

        assert_eq!(occupied(&chest), vec![0, 8]);
        assert_eq!(chest.descriptors(), vec![left, right]);
    }

    #[test]
    fn replace_moves_only_the_named_entry() {
        let materializer = Materializer::default();
        let chest = container("Chest");
        let (left, right) = panes(&chest, &materializer);

        let mut moved = right.clone();
        moved.slots = [9].into_iter().collect();
        assert!(chest
            .replace_descriptor(&materializer, &right, &mut moved)
            .expect("replace"));

        assert_eq!(occupied(&chest), vec![0, 9]);
        assert_eq!(chest.descriptors(), vec![left.clone(), moved]);
        assert!(chest.remove_descriptor(&materializer, &left).expect("remove"));
        assert_eq!(occupied(&chest), vec![9]);
    }

    #[test]
    fn replace_of_unknown_entry_allocates_nothing() {
        let materializer = Materializer::default();
        let chest = container("Chest");
        let (_, right) = panes(&chest, &materializer);

        let mut stale = right.clone();
        stale.slots = [3].into_iter().collect();
        let mut renamed = stale.clone();
        renamed.name = "Window".into();
        assert!(!chest
            .replace_descriptor(&materializer, &stale, &mut renamed)
            .expect("noop"));
        assert_eq!(renamed.identity, right.identity);
        assert_eq!(materializer.identities().len(), 1);
        assert_eq!(occupied(&chest), vec![0, 8]);
    }

    #[test]
    fn find_by_name_prefers_earliest() {
        let materializer = Materializer::default();
        let chest = container("Chest");
        let mut first = item("Sword", "IRON_SWORD", &[0]);
        let mut second = item("Sword", "DIAMOND_SWORD", &[1]);
        chest.add_descriptor(&materializer, &mut first).expect("first");
        chest.add_descriptor(&materializer, &mut second).expect("second");

        let found = chest.find_descriptor_by_name("Sword").expect("found");
        assert_eq!(found.material, "IRON_SWORD");
        assert!(chest.find_descriptor_by_name("Bow").is_none());
    }

    #[test]
    fn overlay_wins_over_base() {
        let materializer = Materializer::default();
        let registry = ContainerRegistry::new();
        let base = container("ShopBase");
        let mut sword = item("Sword", "IRON_SWORD", &[0, 1]);
        base.add_descriptor(&materializer, &mut sword).expect("sword");
        base.save(&registry);

        let shop = Arc::new(
            LayeredContainer::new("Shop", 27)
                .expect("capacity")
                .with_base("ShopBase"),
        );
        let mut shield = item("Shield", "SHIELD", &[0]);
        shop.add_descriptor(&materializer, &mut shield).expect("shield");

        let grid = shop.render(&registry).expect("render");
        assert_eq!(grid.get(0).map(|i| i.material()), Some("SHIELD"));
        assert_eq!(grid.get(1).map(|i| i.material()), Some("IRON_SWORD"));
    }

    #[test]
    fn missing_base_is_skipped() {
        let materializer = Materializer::default();
        let registry = ContainerRegistry::new();
        let shop = Arc::new(
            LayeredContainer::new("Shop", 9)
                .expect("capacity")
                .with_base("Nowhere"),
        );
        let mut shield = item("Shield", "SHIELD", &[3]);
        shop.add_descriptor(&materializer, &mut shield).expect("shield");

        let grid = shop.render(&registry).expect("render");
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn larger_base_is_clipped_to_overlay_capacity() {
        let materializer = Materializer::default();
        let registry = ContainerRegistry::new();
        let base = Arc::new(LayeredContainer::new("Big", 54).expect("capacity"));
        let mut far = item("Far", "STONE", &[50]);
        let mut near = item("Near", "DIRT", &[2]);
        base.add_descriptor(&materializer, &mut far).expect("far");
        base.add_descriptor(&materializer, &mut near).expect("near");
        base.save(&registry);

        let small = LayeredContainer::new("Small", 9).expect("capacity").with_base("Big");
        let grid = small.render(&registry).expect("render");
        assert_eq!(grid.capacity(), 9);
        assert_eq!(grid.occupied_count(), 1);
        assert_eq!(grid.get(2).map(|i| i.material()), Some("DIRT"));
    }

    #[test]
    fn cyclic_bases_are_rejected() {
        let registry = ContainerRegistry::new();
        let a = Arc::new(LayeredContainer::new("A", 9).expect("capacity").with_base("B"));
        let b = Arc::new(LayeredContainer::new("B", 9).expect("capacity").with_base("A"));
        a.save(&registry);
        b.save(&registry);

        match a.render(&registry) {
            Err(InventoryError::CyclicBaseReference { chain }) => {
                assert_eq!(chain, vec!["A", "B", "A"]);
            }
            other => panic!("expected cycle error, got {other:?}"),
        }

        let selfish = LayeredContainer::new("Self", 9).expect("capacity").with_base("Self");
        assert!(matches!(
            selfish.render(&registry),
            Err(InventoryError::CyclicBaseReference { .. })
        ));
    }

    #[test]
    fn clear_keeps_name_and_capacity() {
        let materializer = Materializer::default();
        let chest = container("Chest");
        chest.set_base(Some("Base".into()));
        let mut sword = item("Sword", "IRON_SWORD", &[0]);
        chest.add_descriptor(&materializer, &mut sword).expect("sword");
        chest.clear();
        assert!(chest.is_empty());
        assert!(chest.bindings().is_empty());
        assert_eq!(chest.name(), "Chest");
        assert_eq!(chest.capacity(), 27);
        assert_eq!(chest.base().as_deref(), Some("Base"));
    }

    #[test]
    fn equal_instances_merge_in_bindings_view() {
        let materializer = Materializer::default();
        let chest = container("Chest");
        let mut left = item("Pane", "GLASS_PANE", &[0]);
        let mut right = item("Pane", "GLASS_PANE", &[8]);
        let a = chest.add_descriptor(&materializer, &mut left).expect("left");
        let b = chest.add_descriptor(&materializer, &mut right).expect("right");
        assert_eq!(a, b);

        let bindings = chest.bindings();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].1, BTreeSet::from([0, 8]));
        assert_eq!(chest.len(), 2);
    }

    #[test]
    fn renders_do_not_see_later_mutations() {
        let materializer = Materializer::default();
        let registry = ContainerRegistry::new();
        let chest = container("Chest");
        let mut sword = item("Sword", "IRON_SWORD", &[0]);
        chest.add_descriptor(&materializer, &mut sword).expect("sword");
        let before = chest.render(&registry).expect("render");

        let mut apple = item("Apple", "APPLE", &[1]);
        chest.add_descriptor(&materializer, &mut apple).expect("apple");
        assert_eq!(before.occupied_count(), 1);
        assert_eq!(chest.render(&registry).expect("render").occupied_count(), 2);
    }
}
