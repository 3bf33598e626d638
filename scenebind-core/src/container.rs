//! Binding table: one binding per key, payload is a resolved value or a provider run per resolution.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace, warn};

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("no binding for {0}")]
    NotFound(BindingKey),
    #[error("{0} is already bound")]
    AlreadyBound(BindingKey),
    #[error("binding for {0} holds a value of another type")]
    TypeMismatch(BindingKey),
    #[error("provider for {key} failed: {source}")]
    Provider {
        key: BindingKey,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Type-erased payload value. Always a boxed `Arc<K>` for the key it is bound under.
pub type Erased = Box<dyn Any + Send + Sync>;

/// Provider invoked on every resolution of a transient binding.
pub type ProviderFn =
    Box<dyn Fn() -> Result<Erased, Box<dyn std::error::Error + Send + Sync>> + Send + Sync>;

/// Abstract key a binding is registered under. Keys may be trait objects (`dyn Trait`) or concrete types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BindingKey {
    id: TypeId,
    name: &'static str,
}

impl BindingKey {
    pub fn of<K: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<K>(),
            name: std::any::type_name::<K>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Singleton: resolved once, cached for the container's lifetime. Transient: fresh on every resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Singleton,
    Transient,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Singleton => f.write_str("singleton"),
            Lifecycle::Transient => f.write_str("transient"),
        }
    }
}

/// What a binding hands out: an already resolved value, or a provider invoked per resolution.
pub enum Payload {
    Value(Erased),
    Provider(ProviderFn),
}

impl Payload {
    pub fn value<K: ?Sized + Send + Sync + 'static>(value: Arc<K>) -> Self {
        Payload::Value(Box::new(value))
    }

    /// Wrap a typed provider. Each call's error is reported through `ContainerError::Provider`.
    pub fn provider<K, E, F>(f: F) -> Self
    where
        K: ?Sized + Send + Sync + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
        F: Fn() -> Result<Arc<K>, E> + Send + Sync + 'static,
    {
        Payload::Provider(Box::new(move || {
            f().map(|v| Box::new(v) as Erased).map_err(Into::into)
        }))
    }

    pub fn is_provider(&self) -> bool {
        matches!(self, Payload::Provider(_))
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Value(_) => f.write_str("Value(..)"),
            Payload::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Committed (key, payload, lifecycle) tuple.
#[derive(Debug)]
pub struct Binding {
    pub key: BindingKey,
    pub payload: Payload,
    pub lifecycle: Lifecycle,
}

/// Returned by a successful registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BindingHandle {
    pub key: BindingKey,
    pub lifecycle: Lifecycle,
}

/// Seam the binding engine registers through.
pub trait BindingFactory {
    fn add_binding(
        &mut self,
        key: BindingKey,
        payload: Payload,
        lifecycle: Lifecycle,
    ) -> Result<BindingHandle, ContainerError>;

    fn is_bound(&self, key: &BindingKey) -> bool;
}

/// Binding container: register a payload per key, resolve `Arc<K>` by key type.
pub struct Container {
    bindings: HashMap<BindingKey, Binding>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Resolve the binding for `K`. Values are cloned out of the cache; providers run on every call.
    pub fn resolve<K: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<K>, ContainerError> {
        let key = BindingKey::of::<K>();
        let binding = self.bindings.get(&key).ok_or(ContainerError::NotFound(key))?;
        match &binding.payload {
            Payload::Value(value) => value
                .downcast_ref::<Arc<K>>()
                .cloned()
                .ok_or(ContainerError::TypeMismatch(key)),
            Payload::Provider(provider) => {
                trace!(key = %key, "invoking provider");
                let value = provider().map_err(|source| {
                    warn!(key = %key, error = %source, "provider failed");
                    ContainerError::Provider { key, source }
                })?;
                value
                    .downcast::<Arc<K>>()
                    .map(|boxed| *boxed)
                    .map_err(|_| ContainerError::TypeMismatch(key))
            }
        }
    }

    pub fn contains<K: ?Sized + 'static>(&self) -> bool {
        self.bindings.contains_key(&BindingKey::of::<K>())
    }

    pub fn contains_key(&self, key: &BindingKey) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn lifecycle_of(&self, key: &BindingKey) -> Option<Lifecycle> {
        self.bindings.get(key).map(|b| b.lifecycle)
    }

    /// Remove the binding for `K`, returning it. Values it handed out stay alive with their holders.
    pub fn unbind<K: ?Sized + 'static>(&mut self) -> Option<Binding> {
        self.bindings.remove(&BindingKey::of::<K>())
    }

    pub fn keys(&self) -> impl Iterator<Item = &BindingKey> {
        self.bindings.keys()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl BindingFactory for Container {
    fn add_binding(
        &mut self,
        key: BindingKey,
        payload: Payload,
        lifecycle: Lifecycle,
    ) -> Result<BindingHandle, ContainerError> {
        if self.bindings.contains_key(&key) {
            return Err(ContainerError::AlreadyBound(key));
        }
        debug!(key = %key, lifecycle = %lifecycle, payload = ?payload, "binding added");
        self.bindings.insert(
            key,
            Binding {
                key,
                payload,
                lifecycle,
            },
        );
        Ok(BindingHandle { key, lifecycle })
    }

    fn is_bound(&self, key: &BindingKey) -> bool {
        self.bindings.contains_key(key)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}
