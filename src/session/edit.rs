//! Working-copy edit session with per-row dirty tracking.

use crate::error::{GridError, Result};
use crate::records::{PositionIndex, RecordStore};
use crate::types::{DirtyPolicy, Field, Record, RecordId, SessionState, WorkingRow};
use std::collections::{HashMap, HashSet};

/// Editable copy of the store's records.
#[derive(Clone, Debug, Default)]
pub struct EditSession {
    /// Working rows in display order.
    rows: Vec<WorkingRow>,

    /// Id to position in `rows`.
    index: PositionIndex,

    /// Records as they were when the session began.
    origin: HashMap<RecordId, Record>,

    /// When a write flags its row.
    policy: DirtyPolicy,
}

impl EditSession {
    /// Start a clean session with the default (touch) policy.
    pub fn begin(records: &[Record]) -> Self {
        Self::begin_with_policy(records, DirtyPolicy::default())
    }

    /// Start a clean session over deep copies of `records`.
    pub fn begin_with_policy(records: &[Record], policy: DirtyPolicy) -> Self {
        let rows: Vec<WorkingRow> = records.iter().map(WorkingRow::from_record).collect();
        let index = PositionIndex::build(rows.iter().map(WorkingRow::id));
        let origin = records.iter().map(|r| (r.id, r.clone())).collect();

        Self {
            rows,
            index,
            origin,
            policy,
        }
    }

    /// Working rows in display order.
    pub fn rows(&self) -> &[WorkingRow] {
        &self.rows
    }

    /// Get a working row by id.
    pub fn row(&self, id: RecordId) -> Result<&WorkingRow> {
        let pos = self.position(id)?;
        Ok(&self.rows[pos])
    }

    /// The record a row was derived from, as of session start.
    pub fn origin(&self, id: RecordId) -> Result<&Record> {
        self.origin.get(&id).ok_or(GridError::NotFound(id))
    }

    pub fn policy(&self) -> DirtyPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Current working value of a field.
    pub fn field(&self, id: RecordId, field: Field) -> Result<&str> {
        Ok(self.row(id)?.record.get(field))
    }

    /// Write a field of the row identified by `id`.
    ///
    /// Returns `true` if this write moved the row from clean to dirty.
    pub fn set_field(&mut self, id: RecordId, field: Field, value: impl Into<String>) -> Result<bool> {
        let pos = self.position(id)?;
        let value = value.into();

        let marks_dirty = match self.policy {
            DirtyPolicy::Touch => true,
            DirtyPolicy::Change => self
                .origin
                .get(&id)
                .map_or(true, |origin| origin.get(field) != value),
        };

        let row = &mut self.rows[pos];
        row.record.set(field, value);

        let newly_dirty = marks_dirty && !row.dirty;
        if newly_dirty {
            row.dirty = true;
            tracing::debug!(%id, %field, "row became dirty");
        }
        Ok(newly_dirty)
    }

    /// Whether a row has been touched since the session began.
    pub fn is_row_dirty(&self, id: RecordId) -> Result<bool> {
        Ok(self.row(id)?.dirty)
    }

    /// Flip the row's details toggle. Never affects dirty state.
    pub fn toggle_details(&mut self, id: RecordId) -> Result<bool> {
        let pos = self.position(id)?;
        let row = &mut self.rows[pos];
        row.details_expanded = !row.details_expanded;
        Ok(row.details_expanded)
    }

    pub fn state(&self) -> SessionState {
        if self.rows.iter().any(|r| r.dirty) {
            SessionState::Dirty
        } else {
            SessionState::Clean
        }
    }

    /// Ids of dirty rows in display order.
    pub fn dirty_ids(&self) -> Vec<RecordId> {
        self.rows.iter().filter(|r| r.dirty).map(WorkingRow::id).collect()
    }

    pub fn dirty_count(&self) -> usize {
        self.rows.iter().filter(|r| r.dirty).count()
    }

    /// Every dirty row as a record, in display order.
    ///
    /// Empty when nothing was touched.
    pub fn collect_changes(&self) -> Vec<Record> {
        self.rows
            .iter()
            .filter(|r| r.dirty)
            .map(|r| r.record.clone())
            .collect()
    }

    /// Re-sequence rows to match `ids`, keeping values and flags.
    ///
    /// `ids` must name every row exactly once.
    pub fn reorder(&mut self, ids: &[RecordId]) -> Result<()> {
        if ids.len() != self.rows.len() {
            return Err(GridError::OrderMismatch {
                expected: self.rows.len(),
                got: ids.len(),
            });
        }

        let mut slots: Vec<Option<WorkingRow>> = self.rows.iter().cloned().map(Some).collect();
        let mut reordered = Vec::with_capacity(ids.len());
        for &id in ids {
            let row = self
                .index
                .get(id)
                .and_then(|pos| slots[pos].take())
                .ok_or(GridError::NotFound(id))?;
            reordered.push(row);
        }

        self.rows = reordered;
        self.index.rebuild(self.rows.iter().map(WorkingRow::id));
        Ok(())
    }

    /// Write dirty rows into `store` and restart clean from it.
    ///
    /// Returns the committed records. A clean session commits nothing and
    /// leaves the store untouched. On error the session is left as it was.
    pub fn commit(&mut self, store: &mut RecordStore) -> Result<Vec<Record>> {
        let changes = self.collect_changes();
        if changes.is_empty() {
            return Ok(changes);
        }

        store.apply_changes(&changes)?;
        self.restart(store.records());
        Ok(changes)
    }

    /// Drop all edits and restart clean from the store's current records.
    ///
    /// Expanded details stay expanded.
    pub fn discard(&mut self, store: &RecordStore) {
        self.restart(store.records());
    }

    /// Begin again over `records`, carrying each row's details toggle.
    fn restart(&mut self, records: &[Record]) {
        let expanded: HashSet<RecordId> = self
            .rows
            .iter()
            .filter(|r| r.details_expanded)
            .map(WorkingRow::id)
            .collect();

        *self = Self::begin_with_policy(records, self.policy);
        for row in &mut self.rows {
            row.details_expanded = expanded.contains(&row.id());
        }
    }

    fn position(&self, id: RecordId) -> Result<usize> {
        self.index.get(id).ok_or(GridError::NotFound(id))
    }
}
