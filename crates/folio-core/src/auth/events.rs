//! Session-change notifications.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::AuthSession;

/// A change of the admin session observed by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    SignedIn(AuthSession),
    SignedOut,
}

type Listener = Arc<dyn Fn(&SessionChange) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
}

/// Fan-out of session changes to registered callbacks.
#[derive(Clone, Default)]
pub struct SessionEvents {
    registry: Arc<Mutex<Registry>>,
}

impl SessionEvents {
    /// Register a callback; it stays registered until the returned
    /// [`Subscription`] is unsubscribed or dropped.
    pub fn subscribe(
        &self,
        listener: impl Fn(&SessionChange) + Send + Sync + 'static,
    ) -> Subscription {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.insert(id, Arc::new(listener));

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver a change to every current listener.
    pub fn publish(&self, change: &SessionChange) {
        // Snapshot so listeners may subscribe or unsubscribe while being called.
        let listeners: Vec<Listener> = self.registry.lock().listeners.values().cloned().collect();
        tracing::debug!(
            "Publishing session change to {} listener(s)",
            listeners.len()
        );
        for listener in listeners {
            listener(change);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.lock().listeners.len()
    }
}

impl fmt::Debug for SessionEvents {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Handle to a registered session listener.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Release the listener now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().listeners.remove(&self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Subscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn listeners_receive_changes_until_unsubscribed() {
        let events = SessionEvents::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let subscription = events.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        events.publish(&SessionChange::SignedOut);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(events.listener_count(), 1);

        subscription.unsubscribe();
        events.publish(&SessionChange::SignedOut);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn dropping_subscription_releases_listener() {
        let events = SessionEvents::default();
        {
            let _subscription = events.subscribe(|_| {});
            assert_eq!(events.listener_count(), 1);
        }
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_events_is_harmless() {
        let events = SessionEvents::default();
        let subscription = events.subscribe(|_| {});
        drop(events);
        subscription.unsubscribe();
    }
}
