//! In-memory scene: entities in creation order, behaviors keyed by type.

use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;

use crate::binding::{ConcreteType, Instance};
use crate::catalog::Template;

use super::{EntityRef, EntityRegistry};

struct EntityRecord {
    name: String,
    tags: Vec<String>,
    behaviors: HashMap<TypeId, Instance>,
}

#[derive(Default)]
struct SceneState {
    next_id: u64,
    entities: BTreeMap<EntityRef, EntityRecord>,
}

impl SceneState {
    fn insert(&mut self, record: EntityRecord) -> EntityRef {
        let entity = EntityRef(self.next_id);
        self.next_id += 1;
        self.entities.insert(entity, record);
        entity
    }
}

/// Scene held in memory. Destroying an entity drops its behavior slots; `Arc`s already handed out stay valid.
#[derive(Default)]
pub struct Scene {
    state: RwLock<SceneState>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a named entity with tags.
    pub fn spawn(&self, name: &str, tags: &[&str]) -> EntityRef {
        self.state.write().insert(EntityRecord {
            name: name.to_string(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            behaviors: HashMap::new(),
        })
    }

    pub fn add_tag(&self, entity: EntityRef, tag: &str) -> bool {
        let mut state = self.state.write();
        match state.entities.get_mut(&entity) {
            Some(record) => {
                if !record.tags.iter().any(|t| t == tag) {
                    record.tags.push(tag.to_string());
                }
                true
            }
            None => false,
        }
    }

    pub fn tags_of(&self, entity: EntityRef) -> Vec<String> {
        self.state
            .read()
            .entities
            .get(&entity)
            .map(|r| r.tags.clone())
            .unwrap_or_default()
    }

    pub fn behavior_count(&self, entity: EntityRef) -> usize {
        self.state
            .read()
            .entities
            .get(&entity)
            .map_or(0, |r| r.behaviors.len())
    }

    pub fn len(&self) -> usize {
        self.state.read().entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entities.is_empty()
    }
}

impl EntityRegistry for Scene {
    fn create_entity(&self, hint_name: &str) -> EntityRef {
        self.spawn(hint_name, &[])
    }

    fn find_by_name(&self, name: &str) -> Option<EntityRef> {
        self.state
            .read()
            .entities
            .iter()
            .find(|(_, r)| r.name == name)
            .map(|(e, _)| *e)
    }

    fn find_by_tag(&self, tag: &str) -> Vec<EntityRef> {
        self.state
            .read()
            .entities
            .iter()
            .filter(|(_, r)| r.tags.iter().any(|t| t == tag))
            .map(|(e, _)| *e)
            .collect()
    }

    fn behavior(&self, entity: EntityRef, behavior: TypeId) -> Option<Instance> {
        self.state
            .read()
            .entities
            .get(&entity)
            .and_then(|r| r.behaviors.get(&behavior).cloned())
    }

    fn attach_behavior(&self, entity: EntityRef, behavior: &ConcreteType) -> Option<Instance> {
        if let Some(existing) = self.behavior(entity, behavior.id()) {
            return Some(existing);
        }
        // Constructed unlocked: a behavior's `Default` may read the scene.
        let instance = behavior.create()?;
        let mut state = self.state.write();
        let record = state.entities.get_mut(&entity)?;
        Some(record.behaviors.entry(behavior.id()).or_insert(instance).clone())
    }

    fn instantiate(&self, template: &Template) -> EntityRef {
        let behaviors = template
            .behaviors()
            .map(|b| (b.type_id(), b.spawn()))
            .collect();
        self.state.write().insert(EntityRecord {
            name: template.name().to_string(),
            tags: template.tags().to_vec(),
            behaviors,
        })
    }

    fn destroy(&self, entity: EntityRef) -> bool {
        self.state.write().entities.remove(&entity).is_some()
    }

    fn is_alive(&self, entity: EntityRef) -> bool {
        self.state.read().entities.contains_key(&entity)
    }

    fn name_of(&self, entity: EntityRef) -> Option<String> {
        self.state.read().entities.get(&entity).map(|r| r.name.clone())
    }
}
