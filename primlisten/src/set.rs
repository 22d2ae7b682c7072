//! Equality-based listener registry.

use crate::listener::Listener;

/// Insertion-ordered set of listeners.
///
/// Membership is decided by listener equality checked in both directions,
/// because adapter equality is one-directional: a wrap adapter equals its
/// source but the source does not know about the adapter. Checking both
/// directions lets an adapter be found and removed with the original listener
/// as the key, and keeps a source and its adapter from both being added.
/// Listeners with the same [`origin`](crate::ChangeListener::origin) are
/// members of each other too, so two adapters built independently for one
/// source count as the same listener.
///
/// Entries are compared by registry hash first, so listeners honoring the
/// hash contract are only compared with candidates in the same bucket.
#[derive(Debug)]
pub struct ListenerSet<T> {
    entries: Vec<Entry<T>>,
}

#[derive(Debug)]
struct Entry<T> {
    hash: u64,
    listener: Listener<T>,
}

impl<T> Default for ListenerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListenerSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a listener unless an equal one is already present.
    ///
    /// Returns `true` if the listener was added.
    pub fn add(&mut self, listener: impl Into<Listener<T>>) -> bool {
        let listener = listener.into();
        if self.position(&listener).is_some() {
            return false;
        }

        self.entries.push(Entry {
            hash: listener.listener_hash(),
            listener,
        });
        true
    }

    /// Remove the listener equal to `listener`.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove(&mut self, listener: &Listener<T>) -> bool {
        match self.position(listener) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns whether a listener equal to `listener` is present.
    pub fn contains(&self, listener: &Listener<T>) -> bool {
        self.position(listener).is_some()
    }

    /// Returns the number of listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over listeners in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Listener<T>> {
        self.entries.iter().map(|e| &e.listener)
    }

    /// Clone the current listeners, for notifying outside a lock.
    pub fn snapshot(&self) -> Vec<Listener<T>> {
        self.iter().cloned().collect()
    }

    /// Remove every listener.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, key: &Listener<T>) -> Option<usize> {
        let hash = key.listener_hash();
        self.entries
            .iter()
            .position(|e| e.hash == hash && Self::same_listener(&e.listener, key))
    }

    fn same_listener(entry: &Listener<T>, key: &Listener<T>) -> bool {
        *entry == *key || *key == *entry || entry.origin() == key.origin()
    }
}
