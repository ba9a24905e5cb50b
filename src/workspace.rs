//! Workspace tying the record store, edit session and events together.

use crate::error::Result;
use crate::events::{
    SubscriptionConfig, SubscriptionFilter, SubscriptionHandle, SubscriptionId,
    SubscriptionManager, DEFAULT_BUFFER_SIZE,
};
use crate::records::{RecordStore, DEFAULT_MAX_RECORDS};
use crate::session::EditSession;
use crate::source::RecordSource;
use crate::types::{
    DirtyPolicy, Field, RawRecord, Record, RecordId, SessionState, SortKey, WorkingRow,
};
use parking_lot::{Mutex, RwLock};

/// Workspace configuration.
#[derive(Clone, Debug)]
pub struct WorkspaceConfig {
    /// Records kept from a load; the rest are dropped before ids are assigned.
    pub max_records: usize,

    /// When a field write marks its row dirty.
    pub dirty_policy: DirtyPolicy,

    /// Queue length for subscriptions made with [`Workspace::subscribe`].
    pub event_buffer_size: usize,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
            dirty_policy: DirtyPolicy::Touch,
            event_buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Outcome of a commit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitSummary {
    /// Records written to the store, in display order.
    pub committed: Vec<Record>,
}

impl CommitSummary {
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.committed.iter().map(|r| r.id).collect()
    }
}

/// Consistent view of the grid for rendering.
#[derive(Clone, Debug)]
pub struct GridSnapshot {
    pub rows: Vec<WorkingRow>,
    pub state: SessionState,
    pub sort_key: Option<SortKey>,
}

/// The editable employee grid.
///
/// Provides a unified interface for:
/// - Loading records from a data source
/// - Sorting by column
/// - Editing rows and reading their dirty flags
/// - Committing or discarding edits
///
/// Mutations are serialized by a single write lock. Reads only take read
/// locks and always see a fully applied operation.
pub struct Workspace {
    config: WorkspaceConfig,

    /// Canonical records.
    store: RwLock<RecordStore>,

    /// Working copy being edited.
    session: RwLock<EditSession>,

    /// Presentation notifications.
    events: SubscriptionManager,

    /// Lock for write operations to ensure atomicity.
    write_lock: Mutex<()>,
}

impl Workspace {
    /// Fetch records from `source` and start a clean session.
    ///
    /// A failing source is reported as-is; nothing is retried.
    pub fn open(config: WorkspaceConfig, source: &dyn RecordSource) -> Result<Self> {
        let raw = source.fetch()?;
        Self::from_raw(config, raw)
    }

    /// Build a workspace from already-fetched raw records.
    pub fn from_raw(config: WorkspaceConfig, raw: Vec<RawRecord>) -> Result<Self> {
        let store = RecordStore::load_limited(raw, config.max_records)?;
        let session = EditSession::begin_with_policy(store.records(), config.dirty_policy);

        Ok(Self {
            config,
            store: RwLock::new(store),
            session: RwLock::new(session),
            events: SubscriptionManager::new(),
            write_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Replace the dataset wholesale with a fresh fetch.
    ///
    /// Pending edits are dropped. If the fetch or load fails the current
    /// dataset and session are kept.
    pub fn reload(&self, source: &dyn RecordSource) -> Result<usize> {
        let _lock = self.write_lock.lock();

        let raw = source.fetch()?;
        let new_store = RecordStore::load_limited(raw, self.config.max_records)?;
        let new_session =
            EditSession::begin_with_policy(new_store.records(), self.config.dirty_policy);
        let count = new_store.len();

        {
            let mut store = self.store.write();
            let mut session = self.session.write();
            *store = new_store;
            *session = new_session;
        }

        tracing::info!(count, "reloaded workspace");
        self.events.broadcast_loaded(count);
        Ok(count)
    }

    // --- Record Operations ---

    /// Canonical records in display order.
    pub fn records(&self) -> Vec<Record> {
        self.store.read().records().to_vec()
    }

    /// Get a canonical record by id.
    pub fn get_record(&self, id: RecordId) -> Option<Record> {
        self.store.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Sort the grid by a column. Pending edits follow their rows.
    pub fn sort_by(&self, key: SortKey) -> Result<()> {
        let _lock = self.write_lock.lock();

        {
            let mut store = self.store.write();
            let mut session = self.session.write();
            let mut sorted = store.clone();
            sorted.sort_by(key);
            session.reorder(&sorted.ids())?;
            *store = sorted;
        }

        self.events.broadcast_sorted(key);
        Ok(())
    }

    // --- Session Operations ---

    /// Working rows in display order.
    pub fn rows(&self) -> Vec<WorkingRow> {
        self.session.read().rows().to_vec()
    }

    pub fn row(&self, id: RecordId) -> Result<WorkingRow> {
        self.session.read().row(id).cloned()
    }

    /// Rows, session state and sort key read together.
    pub fn snapshot(&self) -> GridSnapshot {
        let store = self.store.read();
        let session = self.session.read();
        GridSnapshot {
            rows: session.rows().to_vec(),
            state: session.state(),
            sort_key: store.sort_key(),
        }
    }

    /// Write a field of a working row.
    pub fn set_field(&self, id: RecordId, field: Field, value: impl Into<String>) -> Result<()> {
        let _lock = self.write_lock.lock();

        let newly_dirty = self.session.write().set_field(id, field, value)?;
        if newly_dirty {
            self.events.broadcast_row_dirty(id);
        }
        Ok(())
    }

    pub fn is_row_dirty(&self, id: RecordId) -> Result<bool> {
        self.session.read().is_row_dirty(id)
    }

    /// Flip a row's details toggle.
    pub fn toggle_details(&self, id: RecordId) -> Result<bool> {
        let _lock = self.write_lock.lock();
        self.session.write().toggle_details(id)
    }

    pub fn state(&self) -> SessionState {
        self.session.read().state()
    }

    /// Dirty rows as records, without committing them.
    pub fn collect_changes(&self) -> Vec<Record> {
        self.session.read().collect_changes()
    }

    /// Write every dirty row to the store and start a clean session.
    ///
    /// With nothing dirty this returns an empty summary and changes nothing.
    pub fn commit(&self) -> Result<CommitSummary> {
        let _lock = self.write_lock.lock();

        let committed = {
            let mut store = self.store.write();
            let mut session = self.session.write();
            session.commit(&mut store)?
        };

        let summary = CommitSummary { committed };
        if summary.is_empty() {
            tracing::debug!("commit with no dirty rows");
        } else {
            tracing::debug!(count = summary.len(), "committed rows");
            self.events.broadcast_committed(summary.ids());
        }
        Ok(summary)
    }

    /// Throw away every edit and start a clean session.
    pub fn discard(&self) {
        let _lock = self.write_lock.lock();

        {
            let store = self.store.read();
            self.session.write().discard(&store);
        }

        tracing::debug!("discarded edits");
        self.events.broadcast_discarded();
    }

    // --- Subscriptions ---

    /// Subscribe with the configured queue length.
    pub fn subscribe(&self, filter: SubscriptionFilter) -> SubscriptionHandle {
        self.events.subscribe(SubscriptionConfig {
            buffer_size: self.config.event_buffer_size,
            filter,
        })
    }

    pub fn subscribe_with(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.events.subscribe(config)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.events.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::GridEvent;
    use crate::source::StaticSource;

    fn test_workspace() -> Workspace {
        let source = StaticSource::new(vec![
            RawRecord::new("Carol", "female", "Initech"),
            RawRecord::new("Alice", "female", "ACME"),
            RawRecord::new("Bob", "male", "Globex"),
        ]);
        Workspace::open(WorkspaceConfig::default(), &source).unwrap()
    }

    #[test]
    fn test_workspace_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Workspace>();
    }

    #[test]
    fn test_events_follow_operations() {
        let ws = test_workspace();
        let handle = ws.subscribe(SubscriptionFilter::all());

        ws.set_field(RecordId(2), Field::Name, "Robert").unwrap();
        ws.set_field(RecordId(2), Field::Company, "Hooli").unwrap();
        ws.sort_by(SortKey::Name).unwrap();
        ws.commit().unwrap();
        ws.commit().unwrap();
        ws.discard();

        assert_eq!(
            handle.drain(),
            vec![
                GridEvent::RowDirty { id: RecordId(2) },
                GridEvent::Sorted { key: SortKey::Name },
                GridEvent::Committed { ids: vec![RecordId(2)] },
                GridEvent::Discarded,
            ]
        );
    }

    #[test]
    fn test_loaded_is_emitted_by_reload_only() {
        let ws = test_workspace();
        let handle = ws.subscribe(SubscriptionFilter::lifecycle());
        assert!(handle.drain().is_empty());

        let source = StaticSource::new(vec![RawRecord::new("Zoe", "female", "Hooli")]);
        assert_eq!(ws.reload(&source).unwrap(), 1);
        assert_eq!(handle.drain(), vec![GridEvent::Loaded { count: 1 }]);
    }

    #[test]
    fn test_snapshot_reflects_sort_and_state() {
        let ws = test_workspace();
        ws.sort_by(SortKey::Company).unwrap();
        ws.set_field(RecordId(0), Field::Gender, "other").unwrap();

        let snapshot = ws.snapshot();
        assert_eq!(snapshot.sort_key, Some(SortKey::Company));
        assert_eq!(snapshot.state, SessionState::Dirty);
        assert_eq!(snapshot.rows[0].id(), RecordId(1));
    }
}
