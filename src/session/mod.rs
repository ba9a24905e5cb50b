//! Edit sessions over a snapshot of the record store.
//!
//! A session holds an independent working copy of every record. Writes only
//! touch the working copy and flag their row dirty; a commit collects the
//! dirty rows, writes them into the store, and starts over clean.

mod edit;

pub use edit::EditSession;
