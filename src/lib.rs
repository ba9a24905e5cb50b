//! # Roster
//!
//! An editable employee grid: records loaded from a static JSON asset, a
//! working copy that tracks which rows were touched, and commits that merge
//! only those rows back into the canonical list.
//!
//! ## Core Concepts
//!
//! - **Records**: Canonical entries with an id assigned once at load time
//! - **Edit session**: Working copy of every record with a per-row dirty flag
//! - **Commit**: Dirty rows written back by id, then a fresh clean session
//! - **Events**: Notifications a renderer can subscribe to
//!
//! Sorting changes display order only. Ids never change, so edits and
//! commits stay attached to the right record whatever the order.
//!
//! ## Example
//!
//! ```ignore
//! use roster::{Field, JsonFileSource, RecordId, SortKey, Workspace, WorkspaceConfig};
//!
//! let grid = Workspace::open(WorkspaceConfig::default(), &JsonFileSource::default())?;
//!
//! grid.sort_by(SortKey::Company)?;
//! grid.set_field(RecordId(3), Field::Name, "Xavier")?;
//! assert!(grid.is_row_dirty(RecordId(3))?);
//!
//! let summary = grid.commit()?;
//! assert_eq!(summary.ids(), vec![RecordId(3)]);
//! ```

pub mod error;
pub mod events;
pub mod records;
pub mod session;
pub mod source;
pub mod types;
pub mod workspace;

// Re-exports
pub use error::{GridError, Result};
pub use events::{
    DropReason, GridEvent, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId, SubscriptionManager,
};
pub use records::{locale_cmp, PositionIndex, RecordStore, DEFAULT_MAX_RECORDS};
pub use session::EditSession;
pub use source::{parse_records, JsonFileSource, RecordSource, StaticSource, DEFAULT_DATA_PATH};
pub use types::*;
pub use workspace::{CommitSummary, GridSnapshot, Workspace, WorkspaceConfig};
