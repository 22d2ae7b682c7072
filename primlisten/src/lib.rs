//! # primlisten
//!
//! Specialized change-listener contracts for primitive value types.
//!
//! Observables notify their listeners with `(observable, old_value, new_value)`.
//! This crate provides one generic listener contract, [`ChangeListener<T>`],
//! and a specialized contract per primitive type, [`PrimitiveListener<P>`],
//! together with the wrap adapter that turns any generic listener into a
//! specialized one without breaking listener-registry equality.
//!
//! ## Quick Start
//!
//! ```rust
//! use primlisten::{IntChangeListener, Listener, ListenerSet};
//!
//! let generic = Listener::<i32>::from_fn(|_observable, old, new| {
//!     println!("{} -> {}", old, new);
//! });
//!
//! // Wrapping builds an adapter that stands in for `generic`.
//! let specialized = IntChangeListener::wrap(generic.clone());
//! assert_eq!(specialized, generic);
//!
//! // Wrapping a specialized listener again returns it unchanged.
//! let again = IntChangeListener::wrap(specialized.clone());
//! assert_eq!(again.id(), specialized.id());
//!
//! // Registries find the adapter with the original listener as the key.
//! let mut set = ListenerSet::new();
//! set.add(specialized);
//! assert!(set.remove(&generic));
//! ```
//!
//! ## Specialized Contracts
//!
//! | Alias | Value type | Boxed name |
//! |-------|------------|------------|
//! | [`BoolChangeListener`] | `bool` | `Boolean` |
//! | [`ByteChangeListener`] | `i8` | `Byte` |
//! | [`CharChangeListener`] | `char` | `Character` |
//! | [`DoubleChangeListener`] | `f64` | `Double` |
//! | [`FloatChangeListener`] | `f32` | `Float` |
//! | [`IntChangeListener`] | `i32` | `Integer` |
//! | [`LongChangeListener`] | `i64` | `Long` |
//! | [`ShortChangeListener`] | `i16` | `Short` |
//!
//! ## Wrap Semantics
//!
//! | Input | Result |
//! |-------|--------|
//! | Already specialized for `P` | The input itself (same reference) |
//! | Generic listener `L` | New adapter `A`, `A == L`, `A == A`, `hash(A) == hash(L)` |
//!
//! Adapter equality is one-directional: `A == L` holds but `L == A` does not,
//! since `L` knows nothing about `A`. [`ListenerSet`] checks both directions.

pub mod listener;
pub mod observable;
pub mod set;
pub mod wrap;

pub use listener::{ChangeListener, Listener, ListenerId};
pub use observable::{ObservableCell, ObservableValue};
pub use set::ListenerSet;
pub use wrap::{
    BoolChangeListener, ByteChangeListener, CharChangeListener, DoubleChangeListener,
    FloatChangeListener, IntChangeListener, LongChangeListener, Primitive, PrimitiveListener,
    ShortChangeListener, CONTRACT_NAMES,
};
