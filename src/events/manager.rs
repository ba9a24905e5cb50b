//! Fan-out of grid events to subscribers.

use crate::types::{RecordId, SortKey};
use crossbeam_channel::{bounded, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::types::{
    DropReason, GridEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
};

/// One subscriber: its filter and the sending half of its queue.
struct Subscription {
    config: SubscriptionConfig,
    sender: Sender<GridEvent>,
}

impl Subscription {
    /// Queue an event without blocking. `false` means full or disconnected.
    fn try_send(&self, event: GridEvent) -> bool {
        self.sender.try_send(event).is_ok()
    }
}

/// Registry of live subscribers.
pub struct SubscriptionManager {
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    /// Next id to hand out; ids are never reused.
    next_id: AtomicU64,
}

impl SubscriptionManager {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a subscriber with its own bounded queue.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(config.buffer_size);

        self.subscriptions
            .write()
            .insert(id, Subscription { config, sender });

        SubscriptionHandle { id, receiver }
    }

    /// Remove a subscriber. It gets a final `Dropped` if its queue has room.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subs = self.subscriptions.write();
        if let Some(sub) = subs.remove(&id) {
            let _ = sub.sender.try_send(GridEvent::Dropped {
                reason: DropReason::Unsubscribed,
            });
        }
    }

    /// Number of live subscribers.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    // --- Grid notifications ---

    pub fn broadcast_loaded(&self, count: usize) {
        self.broadcast(GridEvent::Loaded { count });
    }

    pub fn broadcast_sorted(&self, key: SortKey) {
        self.broadcast(GridEvent::Sorted { key });
    }

    pub fn broadcast_row_dirty(&self, id: RecordId) {
        self.broadcast(GridEvent::RowDirty { id });
    }

    pub fn broadcast_committed(&self, ids: Vec<RecordId>) {
        self.broadcast(GridEvent::Committed { ids });
    }

    pub fn broadcast_discarded(&self) {
        self.broadcast(GridEvent::Discarded);
    }

    /// Deliver to every matching subscriber; full queues lose their subscriber.
    fn broadcast(&self, event: GridEvent) {
        let mut to_remove = Vec::new();

        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                if sub.config.filter.matches(&event) && !sub.try_send(event.clone()) {
                    to_remove.push(*id);
                }
            }
        }

        if !to_remove.is_empty() {
            let mut subs = self.subscriptions.write();
            for id in to_remove {
                if let Some(sub) = subs.remove(&id) {
                    tracing::warn!(subscription = id.0, "dropping slow subscriber");
                    let _ = sub.sender.try_send(GridEvent::Dropped {
                        reason: DropReason::BufferOverflow,
                    });
                }
            }
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}
