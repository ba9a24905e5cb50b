//! Id to display-position lookup for the record store.

use crate::types::RecordId;
use std::collections::HashMap;

/// Maps each record id to its current position in display order.
///
/// Rebuilt after every reorder; ids themselves never change.
#[derive(Clone, Debug, Default)]
pub struct PositionIndex {
    positions: HashMap<RecordId, usize>,
}

impl PositionIndex {
    /// Build an index over ids in their current order.
    pub fn build(ids: impl IntoIterator<Item = RecordId>) -> Self {
        let mut index = Self::default();
        index.rebuild(ids);
        index
    }

    /// Recompute positions after a reorder.
    pub fn rebuild(&mut self, ids: impl IntoIterator<Item = RecordId>) {
        self.positions.clear();
        self.positions
            .extend(ids.into_iter().enumerate().map(|(pos, id)| (id, pos)));
    }

    /// Position of a record, if it exists.
    pub fn get(&self, id: RecordId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
