//! Property-based tests for item identities
//!
//! Validates identity cache invariants:
//! - Descriptively equal descriptors resolve to the same identity
//! - Distinct instances never share an identity
//! - Slots do not take part in identity

use std::collections::HashMap;

use mdinventory_core::{IdentityCache, ItemDescriptor, ItemId, ItemInstance, Materializer};
use proptest::prelude::*;

fn material() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("STONE"),
        Just("APPLE"),
        Just("DIAMOND"),
        Just("IRON_SWORD"),
    ]
}

proptest! {
    /// Property: identical descriptors resolve to one identity, whatever their slots
    #[test]
    fn equal_descriptors_share_identity(
        name in "[A-Za-z &]{1,12}",
        lore in proptest::collection::vec("[a-z ]{0,8}", 0..3),
        material in material(),
        amount in 1u32..=64,
        first_slots in proptest::collection::btree_set(0i32..54, 1..5),
        second_slots in proptest::collection::btree_set(0i32..54, 1..5),
    ) {
        let materializer = Materializer::default();
        let build = |slots: &std::collections::BTreeSet<i32>| {
            ItemDescriptor::builder()
                .name(name.clone())
                .lore(lore.clone())
                .material(material)
                .amount(amount)
                .slots(slots.iter().copied())
                .build()
        };
        let mut first = build(&first_slots);
        let mut second = build(&second_slots);

        let (a, a_id) = materializer.materialize(&mut first).expect("materialize");
        let (b, b_id) = materializer.materialize(&mut second).expect("materialize");

        prop_assert_eq!(a, b);
        prop_assert_eq!(a_id, b_id);
        prop_assert_eq!(materializer.identities().len(), 1);
    }

    /// Property: the cache is a bijection between distinct instances and ids
    #[test]
    fn distinct_instances_get_distinct_ids(
        specs in proptest::collection::vec((material(), 1u32..=64, "[a-z]{0,4}"), 1..20),
    ) {
        let cache = IdentityCache::new();
        let mut seen: HashMap<ItemInstance, ItemId> = HashMap::new();

        for (material, amount, name) in specs {
            let instance = ItemInstance::new(material, amount).with_display_name(name);
            let id = cache.resolve_id(&instance);
            let expected = *seen.entry(instance.clone()).or_insert(id);
            prop_assert_eq!(id, expected);
            prop_assert_eq!(cache.lookup(id), Some(instance));
        }

        prop_assert_eq!(cache.len(), seen.len());
        let mut ids: Vec<_> = seen.values().copied().collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), seen.len());
    }
}
