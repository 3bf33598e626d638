//! Catalog: templates and static resources retrieved by name.

mod memory;

pub use memory::MemoryCatalog;

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use crate::binding::{Behavior, Classified, ConcreteType, Instance, TargetKind};

/// Read-only lookups by name.
pub trait Catalog: Send + Sync {
    fn load_template(&self, name: &str) -> Option<Arc<Template>>;

    fn load_resource(&self, name: &str) -> Option<Instance>;
}

type SpawnFn = Arc<dyn Fn() -> Instance + Send + Sync>;

/// Behavior a template carries: a prototype owned by the template and a constructor for live copies.
#[derive(Clone)]
pub struct TemplateBehavior {
    type_id: TypeId,
    type_name: &'static str,
    prototype: Instance,
    spawn: SpawnFn,
}

impl TemplateBehavior {
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Fresh instance for a live copy of the template.
    pub fn spawn(&self) -> Instance {
        (self.spawn)()
    }
}

/// Reusable blueprint for live entities.
#[derive(Clone)]
pub struct Template {
    name: String,
    tags: Vec<String>,
    behaviors: Vec<TemplateBehavior>,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            behaviors: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Carry behavior `B`; `make` builds the prototype and every instantiated copy.
    pub fn with_behavior<B, F>(mut self, make: F) -> Self
    where
        B: Behavior,
        F: Fn() -> B + Send + Sync + 'static,
    {
        let prototype: Instance = Arc::new(make());
        self.behaviors.retain(|b| b.type_id != TypeId::of::<B>());
        self.behaviors.push(TemplateBehavior {
            type_id: TypeId::of::<B>(),
            type_name: std::any::type_name::<B>(),
            prototype,
            spawn: Arc::new(move || Arc::new(make()) as Instance),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn behaviors(&self) -> impl Iterator<Item = &TemplateBehavior> {
        self.behaviors.iter()
    }

    /// Prototype behavior owned by the template, if it carries one of this type.
    pub fn behavior(&self, type_id: TypeId) -> Option<Instance> {
        self.behaviors
            .iter()
            .find(|b| b.type_id == type_id)
            .map(|b| b.prototype.clone())
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field(
                "behaviors",
                &self.behaviors.iter().map(|b| b.type_name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

// A template binds as the catalog's own `Arc`, never a copy.
impl Classified for Template {
    fn concrete_type() -> ConcreteType {
        ConcreteType::container::<Self>(TargetKind::Template, |target| {
            target.as_template().map(|t| Arc::clone(t) as Instance)
        })
    }
}
