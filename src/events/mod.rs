//! Change notifications for the presentation layer.
//!
//! A renderer subscribes once and redraws when events arrive:
//! - Dataset reloads
//! - Column sorts
//! - Rows turning dirty
//! - Commits and discards
//!
//! Each subscriber gets a bounded queue. A subscriber that stops draining
//! its queue is dropped instead of blocking the writer.
//!
//! # Example
//!
//! ```ignore
//! let handle = workspace.subscribe(SubscriptionFilter::all());
//!
//! while let Ok(event) = handle.recv() {
//!     match event {
//!         GridEvent::RowDirty { id } => mark_row(id),
//!         GridEvent::Committed { .. } | GridEvent::Discarded => redraw_all(),
//!         GridEvent::Dropped { .. } => break,
//!         _ => {}
//!     }
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    DropReason, GridEvent, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId, DEFAULT_BUFFER_SIZE,
};
