//! Scene: live entities and the behaviors attached to them.

mod memory;

pub use memory::Scene;

use std::any::TypeId;
use std::fmt;

use crate::binding::{Classified, ConcreteType, EntityKind, Instance, Target};
use crate::catalog::Template;

/// Handle to a live entity. Handles are never reused within one registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityRef(pub(crate) u64);

impl EntityRef {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Classified for EntityRef {
    fn concrete_type() -> ConcreteType {
        ConcreteType::entity::<Self>()
    }
}

impl EntityKind for EntityRef {
    fn from_target(target: &Target) -> Option<Self> {
        target.as_entity()
    }
}

/// Entity registry the binding engine locates and attaches through.
///
/// Methods take `&self`: transient providers call back into the registry long after configuration,
/// so implementations keep their own synchronization.
pub trait EntityRegistry: Send + Sync {
    /// New unnamed-by-the-caller entity; `hint_name` is kept for diagnostics and name lookups.
    fn create_entity(&self, hint_name: &str) -> EntityRef;

    /// First live entity with exactly this name, in creation order.
    fn find_by_name(&self, name: &str) -> Option<EntityRef>;

    /// Live entities carrying `tag`, in creation order.
    fn find_by_tag(&self, tag: &str) -> Vec<EntityRef>;

    fn behavior(&self, entity: EntityRef, behavior: TypeId) -> Option<Instance>;

    /// Attach a default instance of `behavior` unless one is present; `None` if the entity is gone.
    fn attach_behavior(&self, entity: EntityRef, behavior: &ConcreteType) -> Option<Instance>;

    /// Live, independent copy of `template`.
    fn instantiate(&self, template: &Template) -> EntityRef;

    /// Returns false if the entity was not alive.
    fn destroy(&self, entity: EntityRef) -> bool;

    fn is_alive(&self, entity: EntityRef) -> bool;

    fn name_of(&self, entity: EntityRef) -> Option<String>;
}
