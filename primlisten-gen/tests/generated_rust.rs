//! Tests for generated Rust contracts.
//!
//! `fixtures/change_listeners.rs` is the output of the Rust emitter for an
//! `int` and `double` registry. It is compiled into this test crate, so the
//! wrap semantics of generated code are checked against the runtime crate.

#[allow(dead_code)]
#[path = "fixtures/change_listeners.rs"]
mod generated;

use std::any::TypeId;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use generated::{DoubleChangeListener, IntChangeListener};
use primlisten::{ChangeListener, Listener, ListenerSet, ObservableCell, ObservableValue};
use primlisten_gen::generator::{ContractGenerator, GeneratorConfig, RustEmitter};
use primlisten_gen::{PrimitiveType, TypeRegistry};

fn registry() -> TypeRegistry {
    TypeRegistry::from_descriptors([
        PrimitiveType::new("int", "Int", "Integer").with_rust_type("i32"),
        PrimitiveType::new("double", "Double", "Double").with_rust_type("f64"),
    ])
    .unwrap()
}

fn noop() -> Listener<i32> {
    Listener::from_fn(|_, _, _| {})
}

#[test]
fn fixture_matches_generator_output() {
    let generator = ContractGenerator::new(RustEmitter::new(), GeneratorConfig::default());
    let artifacts = generator.generate(&registry()).unwrap();

    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].path.to_str(), Some("change_listeners.rs"));
    assert_eq!(
        artifacts[0].contents,
        include_str!("fixtures/change_listeners.rs")
    );
}

#[test]
fn generated_wrap_builds_equal_adapter() {
    let source = noop();
    let wrapped = IntChangeListener::wrap(source.clone());

    assert!(!Listener::ptr_eq(wrapped.as_listener(), &source));
    assert_eq!(*wrapped.as_listener(), source);
    assert_eq!(wrapped, wrapped.clone());
    assert_eq!(wrapped.as_listener().listener_hash(), source.listener_hash());
}

#[test]
fn generated_wrap_is_stable() {
    let once = IntChangeListener::wrap(noop());
    let twice = IntChangeListener::wrap(once.clone());

    assert!(Listener::ptr_eq(once.as_listener(), twice.as_listener()));
}

#[test]
fn generated_contracts_are_distinct() {
    // An `int` adapter is not a `double` contract, and vice versa.
    let int = IntChangeListener::wrap(noop());
    assert_eq!(
        int.as_listener().specialization(),
        Some(TypeId::of::<IntChangeListener>())
    );
    assert_ne!(
        int.as_listener().specialization(),
        Some(TypeId::of::<DoubleChangeListener>())
    );
}

#[test]
fn generated_wrap_respects_hand_written_specialization() {
    struct Manual;

    impl ChangeListener<f64> for Manual {
        fn on_changed(&self, _observable: &dyn ObservableValue<f64>, _old: f64, _new: f64) {}

        fn specialization(&self) -> Option<TypeId> {
            Some(TypeId::of::<DoubleChangeListener>())
        }
    }

    let manual = Listener::new(Manual);
    let wrapped = DoubleChangeListener::wrap(manual.clone());
    assert!(Listener::ptr_eq(wrapped.as_listener(), &manual));
}

#[test]
fn generated_adapter_forwards_changes() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let source = Listener::<f64>::from_fn(move |obs, old, new| {
        sink.lock().unwrap().push((obs.value(), old, new));
    });

    let cell = ObservableCell::new(1.5);
    cell.add_listener(DoubleChangeListener::wrap(source));
    cell.set(2.5);

    assert_eq!(*seen.lock().unwrap(), vec![(2.5, 1.5, 2.5)]);
}

#[test]
fn generated_adapter_is_removable_by_source() {
    let source = noop();
    let mut set = ListenerSet::new();

    assert!(set.add(IntChangeListener::wrap(source.clone())));
    assert!(!set.add(IntChangeListener::wrap(source.clone())));
    assert!(set.remove(&source));
    assert!(set.is_empty());
}

#[test]
fn generated_adapter_in_hash_set() {
    let wrapped = IntChangeListener::wrap(noop());
    let mut set = HashSet::new();

    assert!(set.insert(wrapped.clone()));
    assert!(!set.insert(wrapped.clone()));
    assert!(set.insert(IntChangeListener::wrap(noop())));
    assert_eq!(set.len(), 2);
}
