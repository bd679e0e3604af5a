//! Synchronous value-change notification
//!
//! Plugs notify interested hosts through an explicit observer list
//! rather than a toolkit signal system. Observers run synchronously on
//! the calling thread, in registration order. The list can be blocked
//! while a host pushes values programmatically, mirroring the way UI
//! code blocks slider connections during a refresh.

use crate::value::PlugValue;

/// Handle identifying a registered observer
pub type ObserverId = usize;

type ObserverFn = Box<dyn Fn(&str, &PlugValue)>;

/// Registry of callbacks invoked after a plug value change
#[derive(Default)]
pub struct ObserverList {
    observers: Vec<(ObserverId, ObserverFn)>,
    next_id: ObserverId,
    blocked: usize,
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("observers", &self.observers.len())
            .field("blocked", &self.blocked)
            .finish()
    }
}

impl ObserverList {
    /// Creates an empty observer list
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback, returning a handle for later removal
    pub fn register<F>(&mut self, callback: F) -> ObserverId
    where
        F: Fn(&str, &PlugValue) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Removes a previously registered callback
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Suppresses notification until a matching `unblock` call.
    /// Blocks nest.
    pub fn block(&mut self) {
        self.blocked += 1;
    }

    /// Re-enables notification once every outstanding block is released
    pub fn unblock(&mut self) {
        self.blocked = self.blocked.saturating_sub(1);
    }

    /// Whether notification is currently suppressed
    pub fn is_blocked(&self) -> bool {
        self.blocked > 0
    }

    /// Invokes every live observer with the changed value
    pub fn notify(&self, name: &str, value: &PlugValue) {
        if self.is_blocked() {
            return;
        }
        for (_, observer) in &self.observers {
            observer(name, value);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
