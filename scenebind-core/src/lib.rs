//! scenebind core: the binding table the binding engine registers into and the container resolves from.

pub mod container;

pub use container::{
    Binding, BindingFactory, BindingHandle, BindingKey, Container, ContainerError, Erased, Lifecycle,
    Payload, ProviderFn,
};
