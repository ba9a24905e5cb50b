//! Property tests for ids, dirty tracking and commits.

use proptest::prelude::*;
use roster::{
    locale_cmp, EditSession, Field, RawRecord, RecordId, RecordStore, SortKey,
};
use std::collections::BTreeSet;

fn raw_record() -> impl Strategy<Value = RawRecord> {
    (
        "[A-Za-z][a-z]{0,6}",
        prop_oneof![Just("female"), Just("male")],
        prop_oneof![Just("ACME"), Just("Globex"), Just("Initech"), Just("acme")],
    )
        .prop_map(|(name, gender, company)| RawRecord::new(name, gender, company))
}

fn sort_key() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Id),
        Just(SortKey::Name),
        Just(SortKey::Gender),
        Just(SortKey::Company),
    ]
}

fn field() -> impl Strategy<Value = Field> {
    prop_oneof![Just(Field::Name), Just(Field::Gender), Just(Field::Company)]
}

proptest! {
    #[test]
    fn sorting_never_changes_ids(
        raw in prop::collection::vec(raw_record(), 0..10),
        keys in prop::collection::vec(sort_key(), 1..6),
    ) {
        let mut store = RecordStore::load(raw.clone()).unwrap();
        let before: Vec<_> = store.records().to_vec();

        for key in keys {
            store.sort_by(key);
        }

        let ids: BTreeSet<_> = store.ids().into_iter().collect();
        prop_assert_eq!(ids, (0..raw.len() as u64).map(RecordId).collect::<BTreeSet<_>>());
        for record in &before {
            prop_assert_eq!(store.get(record.id), Some(record));
        }
    }

    #[test]
    fn truncation_happens_before_ids(raw in prop::collection::vec(raw_record(), 0..25)) {
        let store = RecordStore::load(raw.clone()).unwrap();

        prop_assert_eq!(store.len(), raw.len().min(10));
        for (i, record) in store.records().iter().enumerate() {
            prop_assert_eq!(record.id, RecordId(i as u64));
            prop_assert_eq!(Some(record.name.as_str()), raw[i].name.as_deref());
        }
    }

    #[test]
    fn sort_is_stable(
        raw in prop::collection::vec(raw_record(), 0..10),
        key in sort_key(),
    ) {
        let mut store = RecordStore::load(raw).unwrap();
        store.sort_by(key);

        for pair in store.records().windows(2) {
            let ordering = RecordStore::compare(key, &pair[0], &pair[1]);
            prop_assert_ne!(ordering, std::cmp::Ordering::Greater);
            if ordering == std::cmp::Ordering::Equal {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn commit_collects_exactly_touched_rows(
        raw in prop::collection::vec(raw_record(), 1..10),
        edits in prop::collection::vec((0usize..10, field(), "[a-z]{1,5}"), 0..15),
        key in sort_key(),
    ) {
        let mut store = RecordStore::load(raw).unwrap();
        let mut session = EditSession::begin(store.records());
        let mut touched = BTreeSet::new();

        for (i, field, value) in edits {
            let id = RecordId((i % store.len()) as u64);
            session.set_field(id, field, value).unwrap();
            touched.insert(id);
            // Monotonic: stays dirty for the rest of the session.
            for &t in &touched {
                prop_assert!(session.is_row_dirty(t).unwrap());
            }
        }

        store.sort_by(key);
        session.reorder(&store.ids()).unwrap();

        let changed: BTreeSet<_> = session.collect_changes().iter().map(|r| r.id).collect();
        prop_assert_eq!(&changed, &touched);

        let expected: Vec<_> = session.collect_changes();
        let committed = session.commit(&mut store).unwrap();
        prop_assert_eq!(committed.len(), touched.len());
        for record in &expected {
            prop_assert_eq!(store.get(record.id), Some(record));
        }
        prop_assert!(session.dirty_ids().is_empty());
    }

    #[test]
    fn discard_restores_canonical_values(
        raw in prop::collection::vec(raw_record(), 1..10),
        edits in prop::collection::vec((0usize..10, field(), "[a-z]{1,5}"), 1..10),
    ) {
        let store = RecordStore::load(raw).unwrap();
        let mut session = EditSession::begin(store.records());

        for (i, field, value) in edits {
            session.set_field(RecordId((i % store.len()) as u64), field, value).unwrap();
        }
        session.discard(&store);

        for (row, record) in session.rows().iter().zip(store.records()) {
            prop_assert!(!row.dirty);
            prop_assert_eq!(&row.record, record);
        }
    }

    #[test]
    fn locale_cmp_is_a_total_order(a in "\\PC{0,6}", b in "\\PC{0,6}") {
        prop_assert_eq!(locale_cmp(&a, &b), locale_cmp(&b, &a).reverse());
        prop_assert_eq!(locale_cmp(&a, &b) == std::cmp::Ordering::Equal, a == b);
    }
}
