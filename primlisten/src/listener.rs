//! Generic change-listener contract and shared listener handles.
//!
//! This module defines the [`ChangeListener`] trait, the type-erased form of a
//! listener that observables notify with `(observable, old_value, new_value)`,
//! and the [`Listener`] handle under which listeners are stored.
//!
//! ## Registry Equality
//!
//! Listener registries deduplicate by equality, so a listener decides what it
//! is equal to through two provided hooks:
//!
//! - [`ChangeListener::listener_eq`] - whether this listener stands in for the
//!   listener with a given [`ListenerId`]
//! - [`ChangeListener::listener_hash`] - the hash registries bucket it under
//!
//! Both default to reference identity. [`Listener`] routes `PartialEq`, `Eq`
//! and `Hash` through them, so plain `HashSet<Listener<T>>` works as well as
//! [`ListenerSet`](crate::ListenerSet). A third hook,
//! [`ChangeListener::origin`], names the listener an adapter stands in for.

use std::any::TypeId;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::observable::ObservableValue;

/// Identity of a listener allocation.
///
/// Two ids are equal exactly when they were taken from the same object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(usize);

impl ListenerId {
    /// Take the identity of a listener from a reference to it.
    pub fn of<L: ?Sized>(listener: &L) -> Self {
        Self((listener as *const L).cast::<()>() as usize)
    }

    /// Returns the raw address this id was taken from.
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A listener notified when the value of an [`ObservableValue`] changes.
///
/// This is the generic contract: it is bound to a value type `T` but not to
/// any particular primitive specialization. Listeners that accept a wider
/// range of values can implement it for every `T` they support, which is how
/// a "listener over a supertype" is expressed.
///
/// # Example
///
/// ```rust
/// use primlisten::{ChangeListener, ObservableValue};
///
/// struct Printer;
///
/// impl<T: std::fmt::Debug> ChangeListener<T> for Printer {
///     fn on_changed(&self, _observable: &dyn ObservableValue<T>, old_value: T, new_value: T) {
///         println!("{:?} -> {:?}", old_value, new_value);
///     }
/// }
/// ```
pub trait ChangeListener<T>: Send + Sync {
    /// Processes a value change of an observable this listener is attached to.
    fn on_changed(&self, observable: &dyn ObservableValue<T>, old_value: T, new_value: T);

    /// Returns whether this listener is equal to the listener identified by
    /// `other`, as seen by listener registries.
    ///
    /// Defaults to reference identity.
    fn listener_eq(&self, other: ListenerId) -> bool {
        ListenerId::of(self) == other
    }

    /// Returns the hash listener registries bucket this listener under.
    ///
    /// Must agree with [`listener_eq`](ChangeListener::listener_eq): listeners
    /// that compare equal must return the same hash.
    fn listener_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        ListenerId::of(self).hash(&mut hasher);
        hasher.finish()
    }

    /// Returns the identity of the listener this one stands in for.
    ///
    /// Defaults to the listener's own identity. Adapters report their source,
    /// which lets registries treat independently built adapters of the same
    /// source as one listener.
    fn origin(&self) -> ListenerId {
        ListenerId::of(self)
    }

    /// Returns the primitive value type this listener is specialized for.
    ///
    /// A listener returning `Some(TypeId::of::<P>())` already conforms to the
    /// specialized contract for `P` and is never wrapped again by
    /// [`PrimitiveListener::wrap`](crate::PrimitiveListener::wrap).
    fn specialization(&self) -> Option<TypeId> {
        None
    }
}

/// Shared handle to a [`ChangeListener`].
///
/// Equality and hashing delegate to the listener's registry hooks, which makes
/// equality one-directional for adapters: an adapter equals its source, but a
/// plain source only equals itself.
pub struct Listener<T>(Arc<dyn ChangeListener<T>>);

impl<T> Listener<T> {
    /// Create a handle owning the given listener.
    pub fn new<L>(listener: L) -> Self
    where
        L: ChangeListener<T> + 'static,
    {
        Self(Arc::new(listener))
    }

    /// Create a handle from an already shared listener.
    pub fn from_arc(listener: Arc<dyn ChangeListener<T>>) -> Self {
        Self(listener)
    }

    /// Create a generic listener from a closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&dyn ObservableValue<T>, T, T) + Send + Sync + 'static,
    {
        Self::new(FnListener::new(f, None))
    }

    /// Returns the identity of the underlying listener.
    pub fn id(&self) -> ListenerId {
        ListenerId::of(&*self.0)
    }

    /// Returns whether both handles point at the same listener object.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        this.id() == other.id()
    }

    /// Forward a change notification to the listener.
    pub fn on_changed(&self, observable: &dyn ObservableValue<T>, old_value: T, new_value: T) {
        self.0.on_changed(observable, old_value, new_value);
    }

    /// Returns the registry hash of the listener.
    pub fn listener_hash(&self) -> u64 {
        self.0.listener_hash()
    }

    /// Returns the identity of the listener this one stands in for.
    pub fn origin(&self) -> ListenerId {
        self.0.origin()
    }

    /// Returns the specialization reported by the listener.
    pub fn specialization(&self) -> Option<TypeId> {
        self.0.specialization()
    }

    /// Returns the shared listener.
    pub fn as_arc(&self) -> &Arc<dyn ChangeListener<T>> {
        &self.0
    }
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> PartialEq for Listener<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.listener_eq(other.id())
    }
}

impl<T> Eq for Listener<T> {}

impl<T> Hash for Listener<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.listener_hash());
    }
}

impl<T> fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id())
            .field("specialized", &self.specialization().is_some())
            .finish()
    }
}

impl<T> From<Arc<dyn ChangeListener<T>>> for Listener<T> {
    fn from(listener: Arc<dyn ChangeListener<T>>) -> Self {
        Self::from_arc(listener)
    }
}

/// Closure-backed listener.
pub(crate) struct FnListener<F> {
    f: F,
    specialization: Option<TypeId>,
}

impl<F> FnListener<F> {
    pub(crate) fn new(f: F, specialization: Option<TypeId>) -> Self {
        Self { f, specialization }
    }
}

impl<T, F> ChangeListener<T> for FnListener<F>
where
    F: Fn(&dyn ObservableValue<T>, T, T) + Send + Sync,
{
    fn on_changed(&self, observable: &dyn ObservableValue<T>, old_value: T, new_value: T) {
        (self.f)(observable, old_value, new_value);
    }

    fn specialization(&self) -> Option<TypeId> {
        self.specialization
    }
}
