//! Lifecycle policies: shape a located target into a cached value, or into a provider run per resolution.

use std::sync::Arc;

use scenebind_core::{BindingKey, Erased};
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::scene::{EntityRef, EntityRegistry};

use super::classify::{Category, ConcreteType, Instance, UpcastFn};
use super::error::BindError;
use super::locator::{LocationSpec, Locator, Target};

/// Value for `concrete` taken from `target`: the entity itself, or its behavior (attached if missing).
pub fn apply_singleton(
    registry: &dyn EntityRegistry,
    target: &Target,
    concrete: &ConcreteType,
    category: Category,
) -> Result<Instance, BindError> {
    match category {
        Category::ContainerEntity => {
            concrete
                .wrap(target)
                .ok_or_else(|| BindError::IncompatibleTarget {
                    concrete: concrete.name(),
                    target: target.to_string(),
                })
        }
        Category::AttachableBehavior => match target {
            Target::Entity(entity) => attach_if_missing(registry, *entity, concrete),
            // The catalog is read-only: a template only offers the behaviors it was built with.
            Target::Template(template) => template.behavior(concrete.id()).ok_or_else(|| {
                BindError::TargetMissing(format!(
                    "behavior {} on template {:?}",
                    concrete.short_name(),
                    template.name()
                ))
            }),
        },
        Category::LoadableAsset | Category::Unsupported => Err(BindError::UnsupportedCategory {
            concrete: concrete.name(),
        }),
    }
}

/// Existing behavior of this type on `entity`, or a newly attached one. Never attaches twice.
pub fn attach_if_missing(
    registry: &dyn EntityRegistry,
    entity: EntityRef,
    concrete: &ConcreteType,
) -> Result<Instance, BindError> {
    if let Some(existing) = registry.behavior(entity, concrete.id()) {
        return Ok(existing);
    }
    let attached = registry
        .attach_behavior(entity, concrete)
        .ok_or_else(|| BindError::TargetMissing(format!("live entity {}", entity)))?;
    debug!(entity = %entity, behavior = concrete.short_name(), "attached behavior");
    Ok(attached)
}

/// Locate the target, shape it and convert it for `key`. An entity this call created is destroyed
/// again when a later step fails, so a failed bind or resolution leaves the scene as it was.
pub(crate) fn materialize(
    registry: &dyn EntityRegistry,
    catalog: &dyn Catalog,
    location: &LocationSpec,
    concrete: &ConcreteType,
    category: Category,
    key: &BindingKey,
    upcast: &UpcastFn,
) -> Result<Erased, BindError> {
    let target = Locator::new(registry, catalog).locate(location, concrete.short_name())?;
    let created = match (location, &target) {
        (LocationSpec::ByIdentity | LocationSpec::TemplateInstantiate(_), Target::Entity(e)) => Some(*e),
        _ => None,
    };
    let result = apply_singleton(registry, &target, concrete, category).and_then(|instance| {
        upcast(instance).ok_or(BindError::NotAssignable {
            key: key.name(),
            concrete: concrete.name(),
        })
    });
    if let (Err(e), Some(entity)) = (&result, created) {
        registry.destroy(entity);
        debug!(entity = %entity, error = %e, "destroyed entity created for failed binding");
    }
    result
}

/// Provider for a transient binding: every call loads the template, instantiates a new live entity
/// and attaches the behavior if missing. Nothing is cached, so a failed call does not affect the next.
pub(crate) fn make_provider(
    registry: Arc<dyn EntityRegistry>,
    catalog: Arc<dyn Catalog>,
    location: LocationSpec,
    concrete: ConcreteType,
    category: Category,
    key: BindingKey,
    upcast: UpcastFn,
) -> impl Fn() -> Result<Erased, BindError> + Send + Sync + 'static {
    move || {
        trace!(location = %location, concrete = concrete.short_name(), "transient resolution");
        materialize(
            registry.as_ref(),
            catalog.as_ref(),
            &location,
            &concrete,
            category,
            &key,
            &upcast,
        )
    }
}
