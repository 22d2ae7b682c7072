//! Observable values.
//!
//! Listeners only need to know that an observable hands them
//! `(observable, old_value, new_value)`. [`ObservableCell`] is the minimal
//! holder that does this, storing its listeners in a [`ListenerSet`].

use std::sync::{PoisonError, RwLock};

use tracing::trace;

use crate::listener::Listener;
use crate::set::ListenerSet;

/// A value container that notifies attached listeners on change.
pub trait ObservableValue<T> {
    /// Returns the current value.
    fn value(&self) -> T;
}

/// Thread-safe observable value.
///
/// Setting a different value notifies every registered listener with the
/// cell itself, the old value and the new value, in registration order.
/// Listeners are called outside of any lock, on a snapshot of the set.
#[derive(Debug)]
pub struct ObservableCell<T> {
    value: RwLock<T>,
    listeners: RwLock<ListenerSet<T>>,
}

impl<T> ObservableCell<T>
where
    T: Clone + PartialEq + Send + Sync,
{
    /// Create a cell holding `value` with no listeners.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
            listeners: RwLock::new(ListenerSet::new()),
        }
    }

    /// Replace the value, returning the previous one.
    ///
    /// Listeners are notified only if the value actually changed.
    pub fn set(&self, new_value: T) -> T {
        let old_value = {
            let mut guard = self.value.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, new_value.clone())
        };

        if old_value != new_value {
            let listeners = self
                .listeners
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .snapshot();
            trace!(listeners = listeners.len(), "notifying value change");
            for listener in listeners {
                listener.on_changed(self, old_value.clone(), new_value.clone());
            }
        }

        old_value
    }

    /// Attach a listener. Returns `false` if an equal listener is attached.
    pub fn add_listener(&self, listener: impl Into<Listener<T>>) -> bool {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add(listener)
    }

    /// Detach the listener equal to `listener`. Returns `false` if none was.
    pub fn remove_listener(&self, listener: &Listener<T>) -> bool {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(listener)
    }

    /// Returns the number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<T> ObservableValue<T> for ObservableCell<T>
where
    T: Clone,
{
    fn value(&self) -> T {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
