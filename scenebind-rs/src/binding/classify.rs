//! Type compatibility: capability categories per concrete type, key assignability.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use scenebind_core::{BindingKey, Erased};

use super::error::BindError;
use super::locator::{LocationSpec, Target};

/// Shared, type-erased runtime object: an entity wrapper, a behavior, a template or an asset.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Turns a concrete instance into the boxed `Arc<K>` stored under a key.
pub(crate) type UpcastFn = Arc<dyn Fn(Instance) -> Option<Erased> + Send + Sync>;

/// Builds a container-entity instance from a located target.
pub type WrapFn = fn(&Target) -> Option<Instance>;
type CreateFn = fn() -> Instance;
type EraseFn = fn(Instance) -> Option<Erased>;

/// Closed set of capability tags a concrete type can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Composite runtime object that hosts behaviors.
    ContainerEntity,
    /// Unit of behavior living on a container entity.
    AttachableBehavior,
    /// Catalog resource loaded by name.
    LoadableAsset,
    Unsupported,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::ContainerEntity => "container entity",
            Category::AttachableBehavior => "attachable behavior",
            Category::LoadableAsset => "loadable asset",
            Category::Unsupported => "unsupported",
        };
        f.write_str(s)
    }
}

/// Which kind of located target a container-entity type can be built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Entity,
    Template,
}

/// Descriptor computed once per concrete type: category plus the constructors the engine needs.
#[derive(Clone, Copy)]
pub struct ConcreteType {
    id: TypeId,
    name: &'static str,
    category: Category,
    target_kind: Option<TargetKind>,
    wrap: Option<WrapFn>,
    create: Option<CreateFn>,
    erase: EraseFn,
}

impl ConcreteType {
    pub fn of<C: Classified>() -> Self {
        C::concrete_type()
    }

    /// Container entity built from a live entity target.
    pub fn entity<C: EntityKind>() -> Self {
        Self::container::<C>(TargetKind::Entity, |target| {
            C::from_target(target).map(|c| Arc::new(c) as Instance)
        })
    }

    /// Container entity with a custom constructor over the given target kind.
    pub fn container<C: Classified>(target_kind: TargetKind, wrap: WrapFn) -> Self {
        Self {
            target_kind: Some(target_kind),
            wrap: Some(wrap),
            ..Self::bare::<C>(Category::ContainerEntity)
        }
    }

    pub fn behavior<C: Behavior>() -> Self {
        Self {
            create: Some(|| Arc::new(C::default()) as Instance),
            ..Self::bare::<C>(Category::AttachableBehavior)
        }
    }

    pub fn asset<C: Classified>() -> Self {
        Self::bare::<C>(Category::LoadableAsset)
    }

    pub fn unsupported<C: Classified>() -> Self {
        Self::bare::<C>(Category::Unsupported)
    }

    fn bare<C: Classified>(category: Category) -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
            category,
            target_kind: None,
            wrap: None,
            create: None,
            erase: |instance| {
                instance
                    .downcast::<C>()
                    .ok()
                    .map(|c| Box::new(c) as Erased)
            },
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name; used as the name of entities created for this type.
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn target_kind(&self) -> Option<TargetKind> {
        self.target_kind
    }

    pub(crate) fn wrap(&self, target: &Target) -> Option<Instance> {
        self.wrap.and_then(|wrap| wrap(target))
    }

    pub(crate) fn create(&self) -> Option<Instance> {
        self.create.map(|create| create())
    }
}

impl fmt::Debug for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcreteType")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("target_kind", &self.target_kind)
            .finish()
    }
}

/// Declares a type's capability category. A bare `impl Classified for T {}` classifies as unsupported.
pub trait Classified: Send + Sync + 'static {
    fn concrete_type() -> ConcreteType
    where
        Self: Sized,
    {
        ConcreteType::unsupported::<Self>()
    }
}

/// Container-entity type built from a located target (`#[derive(Entity)]` on a newtype over `EntityRef`).
pub trait EntityKind: Classified + Sized {
    fn from_target(target: &Target) -> Option<Self>;
}

/// Attachable behavior; attached instances start from `Default`.
pub trait Behavior: Classified + Default {}

/// Catalog resource loadable by name.
pub trait Asset: Classified {}

/// Entity-targeted classification: only container entities and attachable behaviors pass.
pub fn classify(concrete: &ConcreteType) -> Result<Category, BindError> {
    match concrete.category() {
        c @ (Category::ContainerEntity | Category::AttachableBehavior) => Ok(c),
        Category::LoadableAsset | Category::Unsupported => Err(BindError::UnsupportedCategory {
            concrete: concrete.name(),
        }),
    }
}

/// Fails before anything is located when a container-entity type cannot be built from what `location` yields.
pub(crate) fn check_target(concrete: &ConcreteType, location: &LocationSpec) -> Result<(), BindError> {
    match concrete.target_kind() {
        Some(kind) if kind != location.target_kind() => Err(BindError::IncompatibleTarget {
            concrete: concrete.name(),
            target: location.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Records which concrete types implement which keys.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    upcasts: HashMap<(TypeId, TypeId), UpcastFn>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that `C` satisfies key `K`, e.g. `types.implements::<Health, dyn Damageable>(|h| h as Arc<dyn Damageable>)`.
    pub fn implements<C, K>(&mut self, upcast: fn(Arc<C>) -> Arc<K>) -> &mut Self
    where
        C: Classified,
        K: ?Sized + Send + Sync + 'static,
    {
        let f: UpcastFn = Arc::new(move |instance: Instance| {
            instance
                .downcast::<C>()
                .ok()
                .map(|c| Box::new(upcast(c)) as Erased)
        });
        self.upcasts.insert((TypeId::of::<K>(), TypeId::of::<C>()), f);
        self
    }

    pub fn is_assignable(&self, key: &BindingKey, concrete: &ConcreteType) -> bool {
        key.id() == concrete.id() || self.upcasts.contains_key(&(key.id(), concrete.id()))
    }

    /// Same type or a declared implementor; returns the conversion to store values under `key`.
    pub(crate) fn check(&self, key: &BindingKey, concrete: &ConcreteType) -> Result<UpcastFn, BindError> {
        if key.id() == concrete.id() {
            let erase = concrete.erase;
            return Ok(Arc::new(move |instance: Instance| erase(instance)));
        }
        self.upcasts
            .get(&(key.id(), concrete.id()))
            .cloned()
            .ok_or(BindError::NotAssignable {
                key: key.name(),
                concrete: concrete.name(),
            })
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("upcasts", &self.upcasts.len())
            .finish()
    }
}
