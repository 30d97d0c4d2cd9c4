//! Dense sequential ids for external serializers.
//!
//! Record ids have holes wherever records were freed. A serializer writing
//! records out one after another needs a dense `0..n` numbering instead, and
//! the inverse mapping when reading them back. [`SequentialIds`] captures
//! both directions from one walk of the live records.

use indexmap::IndexSet;
use stride_storage::Storage;

use crate::pool::Pool;

/// Bidirectional map between record ids and dense sequential ids.
///
/// Sequential id `n` is the `n`-th live record in ascending id order at
/// the time the map was built. The map is a snapshot: later creates and
/// deletes are not reflected.
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    records: IndexSet<u64>,
}

impl SequentialIds {
    /// Number every live record of `pool`.
    pub fn build<S: Storage>(pool: &Pool<S>) -> Self {
        Self::from_ids(pool.iter())
    }

    /// Number record ids in the order given. Repeated ids keep their first
    /// position.
    pub fn from_ids(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            records: ids.into_iter().collect(),
        }
    }

    /// Sequential id of `record_id`.
    pub fn sequential(&self, record_id: u64) -> Option<u64> {
        self.records.get_index_of(&record_id).map(|i| i as u64)
    }

    /// Record id numbered `sequential`.
    pub fn record(&self, sequential: u64) -> Option<u64> {
        let index = usize::try_from(sequential).ok()?;
        self.records.get_index(index).copied()
    }

    /// Number of mapped records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record is mapped.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(sequential, record)` pairs in sequential order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.records.iter().enumerate().map(|(i, &id)| (i as u64, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_both_directions() {
        let ids = SequentialIds::from_ids([3, 7, 8, 20]);
        assert_eq!(ids.len(), 4);
        assert_eq!(ids.sequential(7), Some(1));
        assert_eq!(ids.sequential(4), None);
        assert_eq!(ids.record(3), Some(20));
        assert_eq!(ids.record(4), None);
        assert_eq!(
            ids.iter().collect::<Vec<_>>(),
            vec![(0, 3), (1, 7), (2, 8), (3, 20)]
        );
    }

    #[test]
    fn duplicates_keep_first_position() {
        let ids = SequentialIds::from_ids([5, 1, 5]);
        assert_eq!(ids.len(), 2);
        assert_eq!(ids.sequential(5), Some(0));
        assert_eq!(ids.sequential(1), Some(1));
    }

    #[test]
    fn empty_map() {
        let ids = SequentialIds::default();
        assert!(ids.is_empty());
        assert_eq!(ids.record(0), None);
    }
}
