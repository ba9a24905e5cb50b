//! Event and subscription types.

use crate::types::{RecordId, SortKey};
use serde::{Deserialize, Serialize};

/// Default per-subscriber queue length.
pub const DEFAULT_BUFFER_SIZE: usize = 256;

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered events before dropping subscriber.
    /// Default: 256
    pub buffer_size: usize,

    /// Filter criteria.
    pub filter: SubscriptionFilter,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            filter: SubscriptionFilter::all(),
        }
    }
}

/// Filter criteria for subscriptions.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionFilter {
    /// Include per-row events (`RowDirty`).
    pub include_rows: bool,

    /// Restrict row events to these ids (None = every row).
    pub row_ids: Option<Vec<RecordId>>,

    /// Include reload, sort, commit and discard events.
    pub include_lifecycle: bool,
}

impl SubscriptionFilter {
    /// Row events only.
    pub fn rows() -> Self {
        Self {
            include_rows: true,
            ..Default::default()
        }
    }

    /// Row events for specific ids.
    pub fn row_ids(ids: Vec<RecordId>) -> Self {
        Self {
            include_rows: true,
            row_ids: Some(ids),
            ..Default::default()
        }
    }

    /// Reload, sort, commit and discard events.
    pub fn lifecycle() -> Self {
        Self {
            include_lifecycle: true,
            ..Default::default()
        }
    }

    /// Everything.
    pub fn all() -> Self {
        Self {
            include_rows: true,
            include_lifecycle: true,
            ..Default::default()
        }
    }

    pub(crate) fn matches(&self, event: &GridEvent) -> bool {
        match event {
            GridEvent::RowDirty { id } => {
                self.include_rows
                    && self.row_ids.as_ref().map_or(true, |ids| ids.contains(id))
            }
            GridEvent::Dropped { .. } => true,
            _ => self.include_lifecycle,
        }
    }
}

/// Events emitted to subscribers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridEvent {
    /// The dataset was replaced by a reload.
    Loaded { count: usize },

    /// Records were re-sorted.
    Sorted { key: SortKey },

    /// A row was touched for the first time this session.
    RowDirty { id: RecordId },

    /// Dirty rows were written to the store.
    Committed { ids: Vec<RecordId> },

    /// Edits were thrown away.
    Discarded,

    /// Subscription was dropped.
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to receive a subscription's events.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<GridEvent>,
}

impl SubscriptionHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<GridEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<GridEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<GridEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Everything currently queued, without blocking.
    pub fn drain(&self) -> Vec<GridEvent> {
        self.receiver.try_iter().collect()
    }
}
