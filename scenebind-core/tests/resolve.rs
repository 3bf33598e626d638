//! Container: register payloads and resolve them without any scene behind them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use scenebind_core::{BindingFactory, BindingKey, Container, ContainerError, Lifecycle, Payload};

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

struct English;

impl Greeter for English {
    fn greet(&self) -> String {
        "hello".into()
    }
}

#[derive(Debug)]
struct Broken;

impl std::fmt::Display for Broken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("broken")
    }
}

impl std::error::Error for Broken {}

#[test]
fn value_binding_resolves_same_instance() {
    let mut c = Container::new();
    let value: Arc<dyn Greeter> = Arc::new(English);
    c.add_binding(
        BindingKey::of::<dyn Greeter>(),
        Payload::value(Arc::clone(&value)),
        Lifecycle::Singleton,
    )
    .unwrap();
    let a = c.resolve::<dyn Greeter>().unwrap();
    let b = c.resolve::<dyn Greeter>().unwrap();
    assert_eq!(a.greet(), "hello");
    assert!(Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a, &value));
}

#[test]
fn provider_runs_on_every_resolution() {
    let mut c = Container::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    c.add_binding(
        BindingKey::of::<String>(),
        Payload::provider(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Broken>(Arc::new(format!("call {}", n)))
        }),
        Lifecycle::Transient,
    )
    .unwrap();
    assert_eq!(*c.resolve::<String>().unwrap(), "call 0");
    assert_eq!(*c.resolve::<String>().unwrap(), "call 1");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        c.lifecycle_of(&BindingKey::of::<String>()),
        Some(Lifecycle::Transient)
    );
}

#[test]
fn provider_failure_is_reported_and_not_cached() {
    let mut c = Container::new();
    let fail = Arc::new(std::sync::atomic::AtomicBool::new(true));
    let flag = Arc::clone(&fail);
    c.add_binding(
        BindingKey::of::<u32>(),
        Payload::provider(move || {
            if flag.load(Ordering::SeqCst) {
                Err(Broken)
            } else {
                Ok(Arc::new(7u32))
            }
        }),
        Lifecycle::Transient,
    )
    .unwrap();
    match c.resolve::<u32>().unwrap_err() {
        ContainerError::Provider { source, .. } => {
            assert!(source.downcast_ref::<Broken>().is_some())
        }
        other => panic!("expected Provider, got {:?}", other),
    }
    fail.store(false, Ordering::SeqCst);
    assert_eq!(*c.resolve::<u32>().unwrap(), 7);
}

#[test]
fn second_binding_for_key_is_rejected() {
    let mut c = Container::new();
    let key = BindingKey::of::<u8>();
    c.add_binding(key, Payload::value(Arc::new(1u8)), Lifecycle::Singleton)
        .unwrap();
    let err = c
        .add_binding(key, Payload::value(Arc::new(2u8)), Lifecycle::Singleton)
        .unwrap_err();
    assert!(matches!(err, ContainerError::AlreadyBound(k) if k == key));
    assert_eq!(*c.resolve::<u8>().unwrap(), 1);
    assert_eq!(c.len(), 1);
}

#[test]
fn not_found_and_type_mismatch() {
    let mut c = Container::new();
    assert!(matches!(c.resolve::<i64>(), Err(ContainerError::NotFound(_))));
    // A payload registered under a key it does not hold.
    c.add_binding(
        BindingKey::of::<i64>(),
        Payload::value(Arc::new("text")),
        Lifecycle::Singleton,
    )
    .unwrap();
    assert!(matches!(
        c.resolve::<i64>(),
        Err(ContainerError::TypeMismatch(_))
    ));
}

#[test]
fn unbind_removes_binding() {
    let mut c = Container::new();
    c.add_binding(
        BindingKey::of::<u16>(),
        Payload::value(Arc::new(3u16)),
        Lifecycle::Singleton,
    )
    .unwrap();
    assert!(c.contains::<u16>());
    let removed = c.unbind::<u16>().unwrap();
    assert_eq!(removed.lifecycle, Lifecycle::Singleton);
    assert!(!c.contains::<u16>());
    assert!(c.is_empty());
}
