//! Notification bus - synchronous in-process publish/subscribe
//!
//! Handlers run on the publisher's thread, in subscription order, before
//! `publish` returns. Nothing is queued: a late subscriber never sees
//! earlier notifications.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Global bus instance
static NOTIFICATION_BUS: OnceLock<Arc<NotificationBus>> = OnceLock::new();

/// Named notification topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    /// The favorites set changed; re-query the store, there is no payload
    #[serde(rename = "favoritesChanged")]
    FavoritesChanged,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::FavoritesChanged => "favoritesChanged",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A published notification as seen by handlers
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub topic: Topic,
    pub payload: Option<Value>,
}

type Handler = Arc<dyn Fn(&Notification) + Send + Sync>;

struct Subscriber {
    id: u64,
    topic: Topic,
    handler: Handler,
}

/// In-process publish/subscribe channel
pub struct NotificationBus {
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicU64,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Get or initialize the process-wide bus
    pub fn global() -> Arc<NotificationBus> {
        NOTIFICATION_BUS
            .get_or_init(|| Arc::new(NotificationBus::new()))
            .clone()
    }

    /// Register `handler` for `topic`. The returned handle removes it again.
    pub fn subscribe<F>(self: &Arc<Self>, topic: Topic, handler: F) -> Subscription
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.write().push(Subscriber {
            id,
            topic,
            handler: Arc::new(handler),
        });
        tracing::debug!("subscriber {} registered for {}", id, topic);

        Subscription {
            id,
            bus: Arc::downgrade(self),
        }
    }

    /// Deliver a notification to every current subscriber of `topic`
    pub fn publish(&self, topic: Topic, payload: Option<Value>) {
        // snapshot so handlers may subscribe/unsubscribe without deadlocking
        let handlers: Vec<Handler> = self
            .subscribers
            .read()
            .iter()
            .filter(|s| s.topic == topic)
            .map(|s| Arc::clone(&s.handler))
            .collect();

        tracing::debug!("publishing {} to {} subscriber(s)", topic, handlers.len());

        let notification = Notification { topic, payload };
        for handler in handlers {
            handler(&notification);
        }
    }

    /// Number of handlers currently registered for `topic`
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.subscribers
            .read()
            .iter()
            .filter(|s| s.topic == topic)
            .count()
    }

    fn remove(&self, id: u64) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        subscribers.len() != before
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by [`NotificationBus::subscribe`]
///
/// Dropping the handle keeps the subscription alive; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    bus: Weak<NotificationBus>,
}

impl Subscription {
    /// Remove the handler. Returns false when it was already gone.
    pub fn unsubscribe(self) -> bool {
        match self.bus.upgrade() {
            Some(bus) => bus.remove(self.id),
            None => false,
        }
    }
}
