//! Fixtures shared by the binding tests: a scene, a catalog and a few classified types.

#![allow(dead_code)]

use std::sync::Arc;

use scenebind_rs::{
    Asset, Behavior, Binder, Classified, ConcreteType, Entity, EntityRef, MemoryCatalog, Scene,
    TargetKind,
};

pub trait Damageable: Send + Sync {
    fn hp(&self) -> u32;
}

#[derive(Debug, Default, Behavior)]
pub struct Health {
    pub hp: u32,
}

impl Damageable for Health {
    fn hp(&self) -> u32 {
        self.hp
    }
}

#[derive(Debug, Default, Behavior)]
pub struct Ai;

#[derive(Debug, Entity)]
pub struct Spawner(pub EntityRef);

#[derive(Debug, Entity)]
pub struct Camera {
    pub entity: EntityRef,
}

#[derive(Debug, PartialEq, Asset)]
pub struct AudioAsset {
    pub clip: String,
}

/// Container entity whose constructor rejects every target.
#[derive(Debug)]
pub struct Picky;

impl Classified for Picky {
    fn concrete_type() -> ConcreteType {
        ConcreteType::container::<Self>(TargetKind::Entity, |_| None)
    }
}

/// Neither an entity nor a behavior.
pub struct Settings;

impl Classified for Settings {}

pub struct World {
    pub scene: Arc<Scene>,
    pub catalog: Arc<MemoryCatalog>,
}

impl World {
    pub fn new() -> Self {
        Self {
            scene: Arc::new(Scene::new()),
            catalog: Arc::new(MemoryCatalog::new()),
        }
    }

    pub fn binder(&self) -> Binder {
        let mut binder = Binder::new(self.scene.clone(), self.catalog.clone());
        binder
            .types_mut()
            .implements::<Health, dyn Damageable>(|h| h as Arc<dyn Damageable>);
        binder
    }
}
