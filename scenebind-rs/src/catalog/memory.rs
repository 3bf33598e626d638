//! In-memory catalog. Entries can change at runtime, so transient bindings see the current state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::binding::Instance;

use super::{Catalog, Template};

#[derive(Default)]
pub struct MemoryCatalog {
    templates: RwLock<HashMap<String, Arc<Template>>>,
    resources: RwLock<HashMap<String, Instance>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the template under its own name.
    pub fn insert_template(&self, template: Template) -> Arc<Template> {
        let template = Arc::new(template);
        self.templates
            .write()
            .insert(template.name().to_string(), Arc::clone(&template));
        template
    }

    pub fn remove_template(&self, name: &str) -> Option<Arc<Template>> {
        self.templates.write().remove(name)
    }

    pub fn insert_resource<T: Send + Sync + 'static>(&self, name: impl Into<String>, value: T) {
        self.resources.write().insert(name.into(), Arc::new(value));
    }

    pub fn remove_resource(&self, name: &str) -> Option<Instance> {
        self.resources.write().remove(name)
    }

    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.templates.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn resource_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.resources.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Catalog for MemoryCatalog {
    fn load_template(&self, name: &str) -> Option<Arc<Template>> {
        self.templates.read().get(name).cloned()
    }

    fn load_resource(&self, name: &str) -> Option<Instance> {
        self.resources.read().get(name).cloned()
    }
}
