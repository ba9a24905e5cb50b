//! Canonical record storage.
//!
//! Records get a stable id at load time and keep it through every sort;
//! only display order changes. Commits overwrite field values in place.

mod collate;
mod index;
mod store;

pub use collate::locale_cmp;
pub use index::PositionIndex;
pub use store::{RecordStore, DEFAULT_MAX_RECORDS};
