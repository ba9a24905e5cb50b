//! The canonical record store.

use super::collate::locale_cmp;
use super::index::PositionIndex;
use crate::error::{GridError, Result};
use crate::types::{Field, RawRecord, Record, RecordId, SortKey};
use std::cmp::Ordering;

/// Default number of raw records kept by a load.
pub const DEFAULT_MAX_RECORDS: usize = 10;

/// Canonical list of records in display order.
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    /// Records in display order.
    records: Vec<Record>,

    /// Id to position in `records`.
    index: PositionIndex,

    /// Key of the last sort, if any.
    sort_key: Option<SortKey>,
}

impl RecordStore {
    /// Load raw records, keeping at most [`DEFAULT_MAX_RECORDS`].
    pub fn load(raw: Vec<RawRecord>) -> Result<Self> {
        Self::load_limited(raw, DEFAULT_MAX_RECORDS)
    }

    /// Load raw records, keeping at most `max_records` of them.
    ///
    /// Truncation happens before ids are assigned, so ids are always
    /// `0..len` in input order. Any record missing a field fails the whole
    /// load.
    pub fn load_limited(mut raw: Vec<RawRecord>, max_records: usize) -> Result<Self> {
        let total = raw.len();
        if total > max_records {
            tracing::warn!(total, kept = max_records, "truncating loaded records");
            raw.truncate(max_records);
        }

        let records = raw
            .into_iter()
            .enumerate()
            .map(|(pos, raw)| {
                let take = |field: Field| match raw.get(field) {
                    Some(value) if !value.is_empty() => Ok(value.to_string()),
                    _ => Err(GridError::DataShape { index: pos, field }),
                };
                Ok(Record {
                    id: RecordId(pos as u64),
                    name: take(Field::Name)?,
                    gender: take(Field::Gender)?,
                    company: take(Field::Company)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(count = records.len(), "loaded records");

        let index = PositionIndex::build(records.iter().map(|r| r.id));
        Ok(Self {
            records,
            index,
            sort_key: None,
        })
    }

    /// Records in display order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Ids in display order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|r| r.id).collect()
    }

    /// Get a record by id.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.index.get(id).map(|pos| &self.records[pos])
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.index.contains(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Key of the most recent sort.
    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    /// Reorder records in place by `key`, ascending and stable.
    ///
    /// Ids are untouched; only display order changes.
    pub fn sort_by(&mut self, key: SortKey) {
        self.records.sort_by(|a, b| Self::compare(key, a, b));
        self.index.rebuild(self.records.iter().map(|r| r.id));
        self.sort_key = Some(key);
        tracing::debug!(%key, "sorted records");
    }

    /// Compare two records under a sort key.
    pub fn compare(key: SortKey, a: &Record, b: &Record) -> Ordering {
        match key.field() {
            None => a.id.cmp(&b.id),
            Some(field) => locale_cmp(a.get(field), b.get(field)),
        }
    }

    /// Overwrite field values of existing records with `changes`.
    ///
    /// Every id is checked before anything is written: an unknown id means
    /// the stable-id invariant was broken upstream, so the whole batch is
    /// rejected and nothing is mutated. Returns the number of records written.
    pub fn apply_changes(&mut self, changes: &[Record]) -> Result<usize> {
        if let Some(missing) = changes.iter().find(|c| !self.index.contains(c.id)) {
            tracing::error!(id = %missing.id, "change references unknown record");
            return Err(GridError::NotFound(missing.id));
        }

        for change in changes {
            if let Some(pos) = self.index.get(change.id) {
                self.records[pos].assign_fields(change);
            }
        }

        tracing::debug!(count = changes.len(), "applied changes");
        Ok(changes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(n: usize) -> Vec<RawRecord> {
        (0..n)
            .map(|i| RawRecord::new(format!("name{}", i), "female", format!("co{}", n - i)))
            .collect()
    }

    #[test]
    fn test_load_assigns_contiguous_ids() {
        let store = RecordStore::load(raw(4)).unwrap();
        assert_eq!(store.ids(), vec![RecordId(0), RecordId(1), RecordId(2), RecordId(3)]);
        assert_eq!(store.get(RecordId(2)).unwrap().name, "name2");
    }

    #[test]
    fn test_load_truncates_before_ids() {
        let store = RecordStore::load(raw(15)).unwrap();
        assert_eq!(store.len(), 10);
        for (i, record) in store.records().iter().enumerate() {
            assert_eq!(record.id, RecordId(i as u64));
            assert_eq!(record.name, format!("name{}", i));
        }
    }

    #[test]
    fn test_load_ignores_bad_records_past_limit() {
        let mut input = raw(3);
        input.push(RawRecord::default());
        let store = RecordStore::load_limited(input, 3).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_load_rejects_missing_field() {
        let mut input = raw(3);
        input[1].gender = None;
        let result = RecordStore::load(input);
        assert!(matches!(
            result,
            Err(GridError::DataShape { index: 1, field: Field::Gender })
        ));
    }

    #[test]
    fn test_load_rejects_empty_field() {
        let mut input = raw(2);
        input[0].company = Some(String::new());
        assert!(matches!(
            RecordStore::load(input),
            Err(GridError::DataShape { index: 0, field: Field::Company })
        ));
    }

    #[test]
    fn test_sort_by_and_back_to_id() {
        let mut store = RecordStore::load(raw(5)).unwrap();
        store.sort_by(SortKey::Company);
        assert_eq!(store.records()[0].company, "co1");
        assert_eq!(store.records()[0].id, RecordId(4));
        assert_eq!(store.get(RecordId(4)).unwrap().company, "co1");

        store.sort_by(SortKey::Id);
        assert_eq!(store.ids(), (0..5).map(RecordId).collect::<Vec<_>>());
        assert_eq!(store.sort_key(), Some(SortKey::Id));
    }

    #[test]
    fn test_apply_changes_by_id_after_sort() {
        let mut store = RecordStore::load(raw(3)).unwrap();
        store.sort_by(SortKey::Company);

        let mut change = store.get(RecordId(0)).unwrap().clone();
        change.name = "Renamed".into();
        assert_eq!(store.apply_changes(&[change]).unwrap(), 1);

        assert_eq!(store.get(RecordId(0)).unwrap().name, "Renamed");
        assert_eq!(store.get(RecordId(1)).unwrap().name, "name1");
    }

    #[test]
    fn test_apply_changes_unknown_id_is_atomic() {
        let mut store = RecordStore::load(raw(3)).unwrap();

        let mut good = store.get(RecordId(0)).unwrap().clone();
        good.name = "Changed".into();
        let mut bad = good.clone();
        bad.id = RecordId(42);

        let result = store.apply_changes(&[good, bad]);
        assert!(matches!(result, Err(GridError::NotFound(RecordId(42)))));
        assert_eq!(store.get(RecordId(0)).unwrap().name, "name0");
    }
}
