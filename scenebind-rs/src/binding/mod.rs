//! Binding engine: type compatibility, target location, lifecycle policies, registration.

pub mod binder;
pub mod classify;
pub mod error;
pub mod installer;
pub mod lifecycle;
pub mod locator;

pub use binder::{BindStatement, Binder, KeyStatement};
pub use classify::{
    classify, Asset, Behavior, Category, Classified, ConcreteType, EntityKind, Instance, TargetKind,
    TypeRegistry,
};
pub use error::BindError;
pub use installer::Installer;
pub use lifecycle::{apply_singleton, attach_if_missing};
pub use locator::{LocationSpec, Locator, Target};
