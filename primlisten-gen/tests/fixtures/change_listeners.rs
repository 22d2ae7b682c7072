//! Specialized primitive change listeners.

use std::any::TypeId;

use primlisten::{ChangeListener, Listener, ListenerId, ObservableValue};

/// A specialized `int` [`ChangeListener`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct IntChangeListener(Listener<i32>);

impl IntChangeListener {
    /// Returns a specialized [`ChangeListener`] wrapping around the given one. However, if the given `listener` already is a specialized listener of the same type, it is simply returned.
    ///
    /// The wrapper's hashcode is the same as the hashcode of the wrapped listener. The wrapper's `equals()` method only returns true if the wrapped listener is passed as argument.
    pub fn wrap(listener: impl Into<Listener<i32>>) -> Self {
        let listener = listener.into();
        if listener.specialization() == Some(TypeId::of::<Self>()) {
            return Self(listener);
        }
        Self(Listener::new(IntChangeListenerAdapter { source: listener }))
    }

    /// Processes a value change of an ObservableValue this listener is attached to.
    pub fn on_changed(&self, observable: &dyn ObservableValue<i32>, old_value: i32, new_value: i32) {
        self.0.on_changed(observable, old_value, new_value);
    }

    /// Borrow the listener as a generic handle.
    pub fn as_listener(&self) -> &Listener<i32> {
        &self.0
    }
}

impl From<IntChangeListener> for Listener<i32> {
    fn from(listener: IntChangeListener) -> Self {
        listener.0
    }
}

struct IntChangeListenerAdapter {
    source: Listener<i32>,
}

impl ChangeListener<i32> for IntChangeListenerAdapter {
    fn on_changed(&self, observable: &dyn ObservableValue<i32>, old_value: i32, new_value: i32) {
        self.source.on_changed(observable, old_value, new_value);
    }

    fn listener_eq(&self, other: ListenerId) -> bool {
        other == self.source.id() || other == ListenerId::of(self)
    }

    fn origin(&self) -> ListenerId {
        self.source.origin()
    }

    fn listener_hash(&self) -> u64 {
        self.source.listener_hash()
    }

    fn specialization(&self) -> Option<TypeId> {
        Some(TypeId::of::<IntChangeListener>())
    }
}

/// A specialized `double` [`ChangeListener`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct DoubleChangeListener(Listener<f64>);

impl DoubleChangeListener {
    /// Returns a specialized [`ChangeListener`] wrapping around the given one. However, if the given `listener` already is a specialized listener of the same type, it is simply returned.
    ///
    /// The wrapper's hashcode is the same as the hashcode of the wrapped listener. The wrapper's `equals()` method only returns true if the wrapped listener is passed as argument.
    pub fn wrap(listener: impl Into<Listener<f64>>) -> Self {
        let listener = listener.into();
        if listener.specialization() == Some(TypeId::of::<Self>()) {
            return Self(listener);
        }
        Self(Listener::new(DoubleChangeListenerAdapter { source: listener }))
    }

    /// Processes a value change of an ObservableValue this listener is attached to.
    pub fn on_changed(&self, observable: &dyn ObservableValue<f64>, old_value: f64, new_value: f64) {
        self.0.on_changed(observable, old_value, new_value);
    }

    /// Borrow the listener as a generic handle.
    pub fn as_listener(&self) -> &Listener<f64> {
        &self.0
    }
}

impl From<DoubleChangeListener> for Listener<f64> {
    fn from(listener: DoubleChangeListener) -> Self {
        listener.0
    }
}

struct DoubleChangeListenerAdapter {
    source: Listener<f64>,
}

impl ChangeListener<f64> for DoubleChangeListenerAdapter {
    fn on_changed(&self, observable: &dyn ObservableValue<f64>, old_value: f64, new_value: f64) {
        self.source.on_changed(observable, old_value, new_value);
    }

    fn listener_eq(&self, other: ListenerId) -> bool {
        other == self.source.id() || other == ListenerId::of(self)
    }

    fn origin(&self) -> ListenerId {
        self.source.origin()
    }

    fn listener_hash(&self) -> u64 {
        self.source.listener_hash()
    }

    fn specialization(&self) -> Option<TypeId> {
        Some(TypeId::of::<DoubleChangeListener>())
    }
}
