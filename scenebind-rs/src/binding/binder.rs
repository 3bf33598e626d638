//! Binder: validates, locates and shapes bindings, then registers them into the container.

use std::marker::PhantomData;
use std::sync::Arc;

use scenebind_core::{
    BindingFactory, BindingHandle, BindingKey, Container, ContainerError, Erased, Lifecycle, Payload,
};
use tracing::warn;

use crate::catalog::Catalog;
use crate::scene::EntityRegistry;

use super::classify::{check_target, classify, Category, Classified, ConcreteType, TypeRegistry};
use super::error::BindError;
use super::installer::Installer;
use super::lifecycle::{make_provider, materialize};
use super::locator::LocationSpec;

/// Owns the container and the collaborators bindings are located in.
pub struct Binder {
    container: Container,
    registry: Arc<dyn EntityRegistry>,
    catalog: Arc<dyn Catalog>,
    types: TypeRegistry,
}

impl Binder {
    pub fn new(registry: Arc<dyn EntityRegistry>, catalog: Arc<dyn Catalog>) -> Self {
        Self {
            container: Container::new(),
            registry,
            catalog,
            types: TypeRegistry::new(),
        }
    }

    pub fn with_types(mut self, types: TypeRegistry) -> Self {
        self.types = types;
        self
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Declare implementors before binding keys to them.
    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn into_container(self) -> Container {
        self.container
    }

    pub fn registry(&self) -> &Arc<dyn EntityRegistry> {
        &self.registry
    }

    pub fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.catalog
    }

    pub fn resolve<K: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<K>, ContainerError> {
        self.container.resolve::<K>()
    }

    /// Start a binding for key `K`; pick the concrete type with `.to::<C>()` or `.to_self()`.
    pub fn bind<K: ?Sized + Send + Sync + 'static>(&mut self) -> KeyStatement<'_, K> {
        KeyStatement {
            binder: self,
            _key: PhantomData,
        }
    }

    /// Start a binding whose key is the concrete type itself.
    pub fn bind_self<C: Classified>(&mut self) -> BindStatement<'_, C> {
        BindStatement::new(self, ConcreteType::of::<C>())
    }

    /// Bind `K` to the catalog resource `name`, loaded now and kept as a singleton.
    pub fn bind_resource<K: Classified>(&mut self, name: &str) -> Result<BindingHandle, BindError> {
        let key = BindingKey::of::<K>();
        let result = self.commit_resource::<K>(key, name);
        if let Err(e) = &result {
            warn!(key = %key, resource = name, error = %e, "resource binding aborted");
        }
        result
    }

    fn commit_resource<K: Classified>(&mut self, key: BindingKey, name: &str) -> Result<BindingHandle, BindError> {
        if ConcreteType::of::<K>().category() != Category::LoadableAsset {
            return Err(BindError::NotObjectCategory { key: key.name() });
        }
        if self.container.is_bound(&key) {
            return Err(ContainerError::AlreadyBound(key).into());
        }
        // A resource of another type under this name counts as missing.
        let value = self
            .catalog
            .load_resource(name)
            .and_then(|instance| instance.downcast::<K>().ok())
            .ok_or_else(|| BindError::ResourceMissing {
                name: name.to_string(),
            })?;
        self.register(key, Payload::value(value), Lifecycle::Singleton)
    }

    /// Run an installer; the first failing binding aborts it.
    pub fn install(&mut self, installer: &mut dyn Installer) -> Result<(), BindError> {
        installer.install(self)
    }

    fn commit(
        &mut self,
        key: BindingKey,
        concrete: ConcreteType,
        location: LocationSpec,
        lifecycle: Lifecycle,
    ) -> Result<BindingHandle, BindError> {
        let upcast = self.types.check(&key, &concrete)?;
        let category = classify(&concrete)?;
        if lifecycle == Lifecycle::Transient && !location.instantiates() {
            return Err(BindError::TransientRequiresTemplate(location));
        }
        check_target(&concrete, &location)?;
        if self.container.is_bound(&key) {
            return Err(ContainerError::AlreadyBound(key).into());
        }

        let payload = match lifecycle {
            Lifecycle::Singleton => Payload::Value(materialize(
                self.registry.as_ref(),
                self.catalog.as_ref(),
                &location,
                &concrete,
                category,
                &key,
                &upcast,
            )?),
            Lifecycle::Transient => {
                let provider = make_provider(
                    Arc::clone(&self.registry),
                    Arc::clone(&self.catalog),
                    location,
                    concrete,
                    category,
                    key,
                    upcast,
                );
                Payload::Provider(Box::new(
                    move || -> Result<Erased, Box<dyn std::error::Error + Send + Sync>> {
                        Ok(provider()?)
                    },
                ))
            }
        };
        self.register(key, payload, lifecycle)
    }

    fn register(
        &mut self,
        key: BindingKey,
        payload: Payload,
        lifecycle: Lifecycle,
    ) -> Result<BindingHandle, BindError> {
        Ok(self.container.add_binding(key, payload, lifecycle)?)
    }
}

/// Binding for key `K` waiting for its concrete type.
pub struct KeyStatement<'b, K: ?Sized> {
    binder: &'b mut Binder,
    _key: PhantomData<fn() -> Arc<K>>,
}

impl<'b, K: ?Sized + Send + Sync + 'static> KeyStatement<'b, K> {
    pub fn to<C: Classified>(self) -> BindStatement<'b, K> {
        BindStatement::new(self.binder, ConcreteType::of::<C>())
    }

    /// Concrete type given as a descriptor.
    pub fn to_type(self, concrete: ConcreteType) -> BindStatement<'b, K> {
        BindStatement::new(self.binder, concrete)
    }
}

impl<'b, K: Classified> KeyStatement<'b, K> {
    /// The key is its own concrete type; same as `bind_self::<K>()`.
    pub fn to_self(self) -> BindStatement<'b, K> {
        BindStatement::new(self.binder, ConcreteType::of::<K>())
    }
}

/// Binding for key `K` to a concrete type; set the location, then commit with a lifecycle.
pub struct BindStatement<'b, K: ?Sized> {
    binder: &'b mut Binder,
    concrete: ConcreteType,
    location: LocationSpec,
    _key: PhantomData<fn() -> Arc<K>>,
}

impl<'b, K: ?Sized + Send + Sync + 'static> BindStatement<'b, K> {
    fn new(binder: &'b mut Binder, concrete: ConcreteType) -> Self {
        Self {
            binder,
            concrete,
            location: LocationSpec::ByIdentity,
            _key: PhantomData,
        }
    }

    /// Key type currently being configured.
    pub fn binding_key(&self) -> BindingKey {
        BindingKey::of::<K>()
    }

    pub fn concrete(&self) -> &ConcreteType {
        &self.concrete
    }

    pub fn from(mut self, location: LocationSpec) -> Self {
        self.location = location;
        self
    }

    pub fn from_new_entity(self) -> Self {
        self.from(LocationSpec::ByIdentity)
    }

    pub fn from_name(self, name: impl Into<String>) -> Self {
        self.from(LocationSpec::ByName(name.into()))
    }

    pub fn from_tag(self, tag: impl Into<String>) -> Self {
        self.from(LocationSpec::ByTag(tag.into()))
    }

    pub fn from_template(self, name: impl Into<String>) -> Self {
        self.from(LocationSpec::TemplateByName(name.into()))
    }

    pub fn from_template_instance(self, name: impl Into<String>) -> Self {
        self.from(LocationSpec::TemplateInstantiate(name.into()))
    }

    /// Locate and shape the value now; the container keeps it for its lifetime.
    pub fn singleton(self) -> Result<BindingHandle, BindError> {
        self.lifecycle(Lifecycle::Singleton)
    }

    /// Defer to each resolution: the template is reloaded and instantiated every time.
    /// Only valid with `from_template_instance`.
    pub fn transient(self) -> Result<BindingHandle, BindError> {
        self.lifecycle(Lifecycle::Transient)
    }

    pub fn lifecycle(self, lifecycle: Lifecycle) -> Result<BindingHandle, BindError> {
        let key = self.binding_key();
        let location = self.location.to_string();
        let result = self
            .binder
            .commit(key, self.concrete, self.location, lifecycle);
        if let Err(e) = &result {
            warn!(key = %key, location = %location, error = %e, "binding aborted");
        }
        result
    }
}
