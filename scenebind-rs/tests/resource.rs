//! Resource bindings: a catalog resource loaded by name, kept as a singleton.

mod common;

use std::sync::Arc;

use common::{AudioAsset, Health, World};
use scenebind_rs::{BindError, ContainerError, JsonAsset, Lifecycle};

#[test]
fn missing_resource_fails() {
    let world = World::new();
    let mut binder = world.binder();
    let err = binder.bind_resource::<AudioAsset>("explosion").unwrap_err();
    assert!(matches!(err, BindError::ResourceMissing { ref name } if name == "explosion"));
    assert!(binder.container().is_empty());
}

#[test]
fn present_resource_resolves_to_same_value() {
    let world = World::new();
    world.catalog.insert_resource(
        "explosion",
        AudioAsset {
            clip: "boom.ogg".into(),
        },
    );
    let mut binder = world.binder();
    let handle = binder.bind_resource::<AudioAsset>("explosion").unwrap();
    assert_eq!(handle.lifecycle, Lifecycle::Singleton);

    let a = binder.resolve::<AudioAsset>().unwrap();
    let b = binder.resolve::<AudioAsset>().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.clip, "boom.ogg");

    // Loaded at bind time: later catalog changes do not reach the binding.
    world.catalog.remove_resource("explosion");
    assert!(Arc::ptr_eq(&a, &binder.resolve::<AudioAsset>().unwrap()));
}

#[test]
fn non_asset_key_is_rejected() {
    let world = World::new();
    world.catalog.insert_resource("health", Health { hp: 1 });
    let mut binder = world.binder();
    let err = binder.bind_resource::<Health>("health").unwrap_err();
    assert!(matches!(err, BindError::NotObjectCategory { .. }));
}

#[test]
fn resource_of_another_type_counts_as_missing() {
    let world = World::new();
    world
        .catalog
        .insert_resource("explosion", JsonAsset(serde_json::json!({ "volume": 0.8 })));
    let mut binder = world.binder();
    let err = binder.bind_resource::<AudioAsset>("explosion").unwrap_err();
    assert!(matches!(err, BindError::ResourceMissing { .. }));
    binder.bind_resource::<JsonAsset>("explosion").unwrap();
    assert_eq!(binder.resolve::<JsonAsset>().unwrap().0["volume"], 0.8);
}

#[test]
fn resource_key_binds_once() {
    let world = World::new();
    world.catalog.insert_resource("a", AudioAsset { clip: "a".into() });
    world.catalog.insert_resource("b", AudioAsset { clip: "b".into() });
    let mut binder = world.binder();
    binder.bind_resource::<AudioAsset>("a").unwrap();
    let err = binder.bind_resource::<AudioAsset>("b").unwrap_err();
    assert!(matches!(err, BindError::Container(ContainerError::AlreadyBound(_))));
    assert_eq!(binder.resolve::<AudioAsset>().unwrap().clip, "a");
}
