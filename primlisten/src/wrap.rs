//! Specialized primitive listeners and the wrap adapter.
//!
//! A [`PrimitiveListener<P>`] is the specialized contract for one primitive
//! value type `P`. Any generic [`Listener<P>`] can be turned into one with
//! [`PrimitiveListener::wrap`]:
//!
//! 1. If the listener already conforms to the specialized contract for `P`,
//!    it is returned as is. No adapter is allocated and the result is
//!    reference-identical to the input, so wrapping on every registration
//!    never nests adapters.
//! 2. Otherwise a new adapter is built that forwards every change verbatim,
//!    is equal only to its source and to itself, and hashes like its source.
//!    An adapter can therefore be looked up and removed from a listener
//!    registry with the original listener as the key.
//!
//! Adapters hold nothing but an immutable handle to their source, so equality
//! and hashing are safe to call from any thread.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::listener::{ChangeListener, FnListener, Listener, ListenerId};
use crate::observable::ObservableValue;

/// A primitive value type eligible for a specialized listener contract.
pub trait Primitive: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Canonical type name, e.g. `int`.
    const NAME: &'static str;

    /// Short code the contract name is built from, e.g. `Int`.
    const ABBREVIATION: &'static str;

    /// Name of the boxed/reference counterpart, e.g. `Integer`.
    const BOXED_NAME: &'static str;

    /// Returns the specialized contract name, `<Abbreviation>ChangeListener`.
    fn contract_name() -> String {
        format!("{}ChangeListener", Self::ABBREVIATION)
    }
}

/// A listener specialized for the primitive value type `P`.
pub struct PrimitiveListener<P: Primitive>(Listener<P>);

impl<P: Primitive> PrimitiveListener<P> {
    /// Returns a specialized listener wrapping around the given one.
    ///
    /// If `listener` already is a specialized listener for `P` it is simply
    /// returned. Otherwise the returned adapter's hash is the hash of the
    /// wrapped listener, and it is equal only to the wrapped listener and to
    /// itself.
    pub fn wrap(listener: impl Into<Listener<P>>) -> Self {
        let listener = listener.into();
        if listener.specialization() == Some(TypeId::of::<P>()) {
            trace!(
                contract = %Self::contract_name(),
                listener = %listener.id(),
                "listener already specialized"
            );
            return Self(listener);
        }

        let adapter = Listener::new(WrapAdapter { source: listener });
        trace!(
            contract = %Self::contract_name(),
            adapter = %adapter.id(),
            "wrapped generic listener"
        );
        Self(adapter)
    }

    /// Create a specialized listener from a closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&dyn ObservableValue<P>, P, P) + Send + Sync + 'static,
    {
        Self(Listener::new(FnListener::new(f, Some(TypeId::of::<P>()))))
    }

    /// Returns the contract name of this specialization.
    pub fn contract_name() -> String {
        P::contract_name()
    }

    /// Processes a value change of an observable this listener is attached to.
    pub fn on_changed(&self, observable: &dyn ObservableValue<P>, old_value: P, new_value: P) {
        self.0.on_changed(observable, old_value, new_value);
    }

    /// Returns the identity of the underlying listener.
    pub fn id(&self) -> ListenerId {
        self.0.id()
    }

    /// Borrow the listener as a generic handle.
    pub fn as_listener(&self) -> &Listener<P> {
        &self.0
    }

    /// Convert into a generic handle to the same listener.
    pub fn into_listener(self) -> Listener<P> {
        self.0
    }
}

impl<P: Primitive> Clone for PrimitiveListener<P> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<P: Primitive> PartialEq for PrimitiveListener<P> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<P: Primitive> PartialEq<Listener<P>> for PrimitiveListener<P> {
    fn eq(&self, other: &Listener<P>) -> bool {
        self.0 == *other
    }
}

impl<P: Primitive> Eq for PrimitiveListener<P> {}

impl<P: Primitive> Hash for PrimitiveListener<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<P: Primitive> fmt::Debug for PrimitiveListener<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(&Self::contract_name())
            .field("id", &self.0.id())
            .finish()
    }
}

impl<P: Primitive> From<PrimitiveListener<P>> for Listener<P> {
    fn from(listener: PrimitiveListener<P>) -> Self {
        listener.into_listener()
    }
}

/// Adapter standing in for a generic listener under a specialized contract.
struct WrapAdapter<P: Primitive> {
    source: Listener<P>,
}

impl<P: Primitive> ChangeListener<P> for WrapAdapter<P> {
    fn on_changed(&self, observable: &dyn ObservableValue<P>, old_value: P, new_value: P) {
        self.source.on_changed(observable, old_value, new_value);
    }

    fn listener_eq(&self, other: ListenerId) -> bool {
        other == self.source.id() || other == ListenerId::of(self)
    }

    fn listener_hash(&self) -> u64 {
        self.source.listener_hash()
    }

    fn origin(&self) -> ListenerId {
        self.source.origin()
    }

    fn specialization(&self) -> Option<TypeId> {
        Some(TypeId::of::<P>())
    }
}

/// Implements [`Primitive`] and declares the named contract alias for each
/// registered primitive type.
macro_rules! primitive_listeners {
    ($($ty:ty => $name:literal, $abbrev:literal, $boxed:literal, $alias:ident;)*) => {
        $(
            impl Primitive for $ty {
                const NAME: &'static str = $name;
                const ABBREVIATION: &'static str = $abbrev;
                const BOXED_NAME: &'static str = $boxed;
            }

            #[doc = concat!("A specialized `", $name, "` change listener.")]
            pub type $alias = PrimitiveListener<$ty>;
        )*

        /// Contract names of all built-in specializations, in registry order.
        pub const CONTRACT_NAMES: &[&str] = &[$(concat!($abbrev, "ChangeListener")),*];
    };
}

primitive_listeners! {
    bool => "boolean", "Bool", "Boolean", BoolChangeListener;
    i8 => "byte", "Byte", "Byte", ByteChangeListener;
    char => "char", "Char", "Character", CharChangeListener;
    f64 => "double", "Double", "Double", DoubleChangeListener;
    f32 => "float", "Float", "Float", FloatChangeListener;
    i32 => "int", "Int", "Integer", IntChangeListener;
    i64 => "long", "Long", "Long", LongChangeListener;
    i16 => "short", "Short", "Short", ShortChangeListener;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    struct Fixed(i64);

    impl ObservableValue<i64> for Fixed {
        fn value(&self) -> i64 {
            self.0
        }
    }

    #[test]
    fn test_wrap_generic_builds_adapter() {
        let generic = Listener::<i32>::from_fn(|_, _, _| {});
        let wrapped = IntChangeListener::wrap(generic.clone());

        assert!(!Listener::ptr_eq(wrapped.as_listener(), &generic));
        assert_eq!(wrapped, generic);
        assert_eq!(wrapped, wrapped.clone());
        assert_eq!(wrapped.as_listener().listener_hash(), generic.listener_hash());
    }

    #[test]
    fn test_wrap_specialized_is_identity() {
        let specialized = IntChangeListener::from_fn(|_, _, _| {});
        let wrapped = IntChangeListener::wrap(specialized.clone());

        assert_eq!(wrapped.id(), specialized.id());
    }

    #[test]
    fn test_rewrap_is_stable() {
        let generic = Listener::<f64>::from_fn(|_, _, _| {});
        let once = DoubleChangeListener::wrap(generic);
        let twice = DoubleChangeListener::wrap(once.clone());

        assert_eq!(once.id(), twice.id());
    }

    #[test]
    fn test_adapter_forwards_verbatim() {
        let last = Arc::new(AtomicI64::new(0));
        let sink = Arc::clone(&last);
        let generic = Listener::<i64>::from_fn(move |obs, old, new| {
            sink.store(obs.value() * 100 + old * 10 + new, Ordering::SeqCst);
        });

        let wrapped = LongChangeListener::wrap(generic);
        wrapped.on_changed(&Fixed(4), 1, 2);
        assert_eq!(last.load(Ordering::SeqCst), 412);
    }

    #[test]
    fn test_source_does_not_equal_adapter() {
        let generic = Listener::<i16>::from_fn(|_, _, _| {});
        let wrapped = ShortChangeListener::wrap(generic.clone());

        assert!(wrapped == generic);
        assert!(generic != *wrapped.as_listener());
    }

    #[test]
    fn test_independent_adapters_both_equal_source() {
        let generic = Listener::<bool>::from_fn(|_, _, _| {});
        let a = BoolChangeListener::wrap(generic.clone());
        let b = BoolChangeListener::wrap(generic.clone());

        assert_eq!(a, generic);
        assert_eq!(b, generic);
        assert_ne!(a, b);
        assert_eq!(a.as_listener().origin(), generic.id());
        assert_eq!(a.as_listener().origin(), b.as_listener().origin());
        assert_eq!(
            a.as_listener().listener_hash(),
            b.as_listener().listener_hash()
        );
    }

    #[test]
    fn test_contract_names() {
        assert_eq!(IntChangeListener::contract_name(), "IntChangeListener");
        assert_eq!(<char as Primitive>::BOXED_NAME, "Character");
        assert_eq!(CONTRACT_NAMES.len(), 8);
        assert_eq!(CONTRACT_NAMES[0], "BoolChangeListener");
        assert_eq!(CONTRACT_NAMES[7], "ShortChangeListener");
    }
}
