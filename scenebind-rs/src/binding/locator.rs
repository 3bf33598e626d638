//! Target locator: turns a location strategy into a live entity or a catalog template.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Catalog, Template};
use crate::scene::{EntityRef, EntityRegistry};

use super::classify::TargetKind;
use super::error::BindError;

/// How the target of a binding is found.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LocationSpec {
    /// Create a new entity named after the concrete type.
    ByIdentity,
    /// Existing entity with this exact name. Never creates one.
    ByName(String),
    /// First entity, in creation order, carrying this tag.
    ByTag(String),
    /// Named template from the catalog, not instantiated.
    TemplateByName(String),
    /// Named template from the catalog, instantiated into a new live entity.
    TemplateInstantiate(String),
}

impl LocationSpec {
    /// Creates a new live entity from a template on every locate.
    pub fn instantiates(&self) -> bool {
        matches!(self, LocationSpec::TemplateInstantiate(_))
    }

    /// Kind of target this strategy yields when it succeeds.
    pub fn target_kind(&self) -> TargetKind {
        match self {
            LocationSpec::TemplateByName(_) => TargetKind::Template,
            _ => TargetKind::Entity,
        }
    }
}

impl fmt::Display for LocationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationSpec::ByIdentity => f.write_str("new entity"),
            LocationSpec::ByName(name) => write!(f, "entity named {:?}", name),
            LocationSpec::ByTag(tag) => write!(f, "entity tagged {:?}", tag),
            LocationSpec::TemplateByName(name) => write!(f, "template {:?}", name),
            LocationSpec::TemplateInstantiate(name) => write!(f, "instance of template {:?}", name),
        }
    }
}

/// Located target: a live entity or a catalog-owned template.
#[derive(Clone, Debug)]
pub enum Target {
    Entity(EntityRef),
    Template(Arc<Template>),
}

impl Target {
    pub fn as_entity(&self) -> Option<EntityRef> {
        match self {
            Target::Entity(e) => Some(*e),
            Target::Template(_) => None,
        }
    }

    pub fn as_template(&self) -> Option<&Arc<Template>> {
        match self {
            Target::Template(t) => Some(t),
            Target::Entity(_) => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Entity(e) => write!(f, "entity {}", e),
            Target::Template(t) => write!(f, "template {:?}", t.name()),
        }
    }
}

/// Point-in-time lookups over the scene and the catalog. Nothing is cached between calls.
pub struct Locator<'a> {
    registry: &'a dyn EntityRegistry,
    catalog: &'a dyn Catalog,
}

impl<'a> Locator<'a> {
    pub fn new(registry: &'a dyn EntityRegistry, catalog: &'a dyn Catalog) -> Self {
        Self { registry, catalog }
    }

    /// `hint` names the entity `ByIdentity` creates.
    pub fn locate(&self, location: &LocationSpec, hint: &str) -> Result<Target, BindError> {
        let target = match location {
            LocationSpec::ByIdentity => Target::Entity(self.registry.create_entity(hint)),
            LocationSpec::ByName(name) => self
                .registry
                .find_by_name(name)
                .map(Target::Entity)
                .ok_or_else(|| BindError::TargetMissing(location.to_string()))?,
            LocationSpec::ByTag(tag) => self
                .registry
                .find_by_tag(tag)
                .into_iter()
                .next()
                .map(Target::Entity)
                .ok_or_else(|| BindError::TargetMissing(location.to_string()))?,
            LocationSpec::TemplateByName(name) => Target::Template(self.load_template(name)?),
            LocationSpec::TemplateInstantiate(name) => {
                let template = self.load_template(name)?;
                Target::Entity(self.registry.instantiate(&template))
            }
        };
        debug!(location = %location, target = %target, "located target");
        Ok(target)
    }

    pub fn load_template(&self, name: &str) -> Result<Arc<Template>, BindError> {
        self.catalog
            .load_template(name)
            .ok_or_else(|| BindError::ResourceMissing {
                name: name.to_string(),
            })
    }
}
