//! Ordering guarantees checked over every root of a store.

use alertgraph::core::{Entity, EntityKey, EntityKind};
use alertgraph::resolver::{Resolution, Resolver};
use alertgraph::store::EntityStore;
use alertgraph::test_utils::DefinitionsFixture;
use std::collections::HashSet;

/// A layered acyclic store: every entity only references entities of lower
/// layers, with the edge pattern chosen by a fixed linear congruential
/// sequence so the store is identical on every run.
fn layered_store(layers: usize, width: usize) -> EntityStore {
    let mut state: u64 = 0x2545_f491;
    let mut next = || {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) as usize
    };

    let kind_of = |layer: usize| match layer % 3 {
        0 => EntityKind::Notification,
        1 => EntityKind::Macro,
        _ => EntityKind::Alert,
    };

    let mut entities = Vec::new();
    for layer in 0..layers {
        for i in 0..width {
            let mut refs = Vec::new();
            if layer > 0 {
                for _ in 0..(next() % 4) {
                    let target_layer = next() % layer;
                    let target = next() % width;
                    refs.push(EntityKey::new(kind_of(target_layer), format!("n{target_layer}_{target}")));
                }
            }
            entities.push(Entity::new(kind_of(layer), format!("n{layer}_{i}"), "", refs));
        }
    }
    EntityStore::from_entities(entities).unwrap()
}

fn check_invariants(store: &EntityStore, root: &EntityKey, resolution: &Resolution<'_>) {
    // Root is last
    assert_eq!(resolution.root().key(), root);

    // No duplicates
    let unique: HashSet<_> = resolution.keys().into_iter().collect();
    assert_eq!(unique.len(), resolution.len(), "duplicate entity in resolution of {root}");

    // Every reference precedes its referrer
    for (index, entity) in resolution.iter().enumerate() {
        for reference in entity.references() {
            let position = resolution.position(reference).unwrap();
            assert!(position < index, "{reference} emitted after {}", entity.key());
        }
    }

    // Nothing unreachable from the root
    let mut reachable = HashSet::new();
    let mut pending = vec![root];
    while let Some(key) = pending.pop() {
        if reachable.insert(key) {
            pending.extend(store.get(key).unwrap().references());
        }
    }
    assert_eq!(unique.len(), reachable.len(), "resolution of {root} has unreachable entities");
}

#[test]
fn test_invariants_hold_for_every_root_of_generated_store() {
    let store = layered_store(12, 8);
    let resolver = Resolver::new(&store);

    for entity in store.iter() {
        let resolution = resolver.resolve_key(entity.key()).unwrap();
        check_invariants(&store, entity.key(), &resolution);
    }
}

#[test]
fn test_invariants_hold_for_fixture_roots() {
    let store = DefinitionsFixture::shared_notification().store().unwrap();
    let resolver = Resolver::new(&store);

    for entity in store.iter() {
        let resolution = resolver.resolve_key(entity.key()).unwrap();
        check_invariants(&store, entity.key(), &resolution);
    }
}

#[test]
fn test_resolution_is_deterministic() {
    let store = layered_store(10, 10);
    let resolver = Resolver::new(&store);

    for entity in store.entities_of(EntityKind::Alert) {
        let first = resolver.resolve_key(entity.key()).unwrap().keys();
        for _ in 0..3 {
            assert_eq!(resolver.resolve_key(entity.key()).unwrap().keys(), first);
        }
    }
}

#[test]
fn test_equal_stores_resolve_identically() {
    let a = layered_store(8, 6);
    let b = layered_store(8, 6);

    for entity in a.iter() {
        let left = Resolver::new(&a).resolve_key(entity.key()).unwrap().keys();
        let right = Resolver::new(&b).resolve_key(entity.key()).unwrap().keys();
        assert_eq!(left, right);
    }
}

#[test]
fn test_concurrent_resolutions_agree() {
    let store = layered_store(10, 8);
    let resolver = Resolver::new(&store);
    let roots: Vec<_> = store.entities_of(EntityKind::Alert).map(Entity::key).collect();

    let sequential: Vec<_> = roots.iter().map(|root| resolver.resolve_key(root).unwrap().keys()).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| roots.iter().map(|root| resolver.resolve_key(root).unwrap().keys()).collect::<Vec<_>>()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), sequential);
        }
    });
}
