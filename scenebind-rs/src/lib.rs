//! scenebind: bind abstract keys to scene entities, attachable behaviors, templates and catalog resources,
//! as singletons resolved once or transients re-instantiated on every resolution.

extern crate self as scenebind_rs;

pub mod binding;
pub mod catalog;
pub mod manifest;
pub mod scene;

pub use binding::{
    Asset, Behavior, BindError, Binder, BindStatement, Category, Classified, ConcreteType, EntityKind,
    Installer, Instance, KeyStatement, LocationSpec, Locator, Target, TargetKind,
    TypeRegistry,
};
pub use catalog::{Catalog, MemoryCatalog, Template};
pub use manifest::{JsonAsset, Manifest, ManifestError, ManifestSummary};
pub use scene::{EntityRef, EntityRegistry, Scene};
pub use scenebind_core::{BindingHandle, BindingKey, Container, ContainerError, Lifecycle};
pub use scenebind_rs_macros::{Asset, Behavior, Entity};
