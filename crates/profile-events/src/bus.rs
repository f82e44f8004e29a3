//! Session-scoped subscription registry
//!
//! Handlers register for one user session and receive every topology event
//! published for that session. Delivery is synchronous, on whichever thread
//! calls [`EventBus::publish`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::debug;

use crate::event::TopologyEvent;

pub type Handler = Arc<dyn Fn(&TopologyEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Registration {
    session: i32,
    handler: Handler,
}

#[derive(Default)]
struct BusInner {
    next_id: AtomicU64,
    handlers: RwLock<HashMap<SubscriptionId, Registration>>,
}

impl BusInner {
    fn remove(&self, id: SubscriptionId) -> bool {
        self.handlers.write().remove(&id).is_some()
    }
}

/// Fan-out point for topology events
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events scoped to `session`
    pub fn subscribe<F>(&self, session: i32, handler: F) -> Subscription
    where
        F: Fn(&TopologyEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.handlers.write().insert(
            id,
            Registration {
                session,
                handler: Arc::new(handler),
            },
        );
        debug!(session, id = id.0, "Topology handler subscribed");

        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Remove a handler. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.remove(id)
    }

    /// Deliver `event` to every handler of its session, returning how many ran
    pub fn publish(&self, event: &TopologyEvent) -> usize {
        // Snapshot so handlers run without the registry lock held
        let targets: Vec<Handler> = self
            .inner
            .handlers
            .read()
            .values()
            .filter(|r| r.session == event.session)
            .map(|r| r.handler.clone())
            .collect();

        for handler in &targets {
            handler(event);
        }

        debug!(
            session = event.session,
            change = ?event.change,
            delivered = targets.len(),
            "Published topology event"
        );
        targets.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.handlers.read().len()
    }
}

/// Handle to a registered handler; unsubscribes when dropped
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
    id: SubscriptionId,
    bus: Weak<BusInner>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.remove(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
