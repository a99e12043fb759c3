//! Insertion-ordered record storage keyed by identifier.

use crate::error::{EngineError, Result};

/// Anything the catalog indexes by a unique identifier.
pub trait Record {
    /// The record's unique, immutable identifier.
    fn id(&self) -> &str;
}

/// A record that can be lent out.
pub trait Circulating: Record {
    /// `true` while the record is on the shelf.
    fn is_available(&self) -> bool;
}

/// Owns a list of records in insertion order and looks them up by identifier.
///
/// Lookups are linear. Sorting reorders the records in place, so there is no
/// secondary position map to keep in sync.
#[derive(Debug, Clone)]
pub struct RecordIndex<T> {
    records: Vec<T>,
}

impl<T: Record> RecordIndex<T> {
    /// Creates an empty index.
    pub fn new() -> Self {
        RecordIndex {
            records: Vec::new(),
        }
    }

    /// Appends a record.
    ///
    /// Fails with [`EngineError::DuplicateIdentifier`] if a record with the
    /// same identifier is already present; the index is left unchanged.
    pub fn add(&mut self, record: T) -> Result<()> {
        if self.find(record.id()).is_some() {
            return Err(EngineError::DuplicateIdentifier {
                id: record.id().to_string(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Looks up a record by identifier.
    pub fn find(&self, id: &str) -> Option<&T> {
        self.position_by(id, |r| r.id())
            .map(|idx| &self.records[idx])
    }

    /// Looks up a record by identifier for mutation.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut T> {
        let idx = self.position_by(id, |r| r.id())?;
        self.records.get_mut(idx)
    }

    /// Position of the first record whose extracted key equals `needle`.
    pub fn position_by<K, F>(&self, needle: &K, key: F) -> Option<usize>
    where
        K: PartialEq + ?Sized,
        F: Fn(&T) -> &K,
    {
        self.records.iter().position(|r| key(r) == needle)
    }

    /// Stable in-place sort on an extracted key.
    pub fn sort_by<K, F>(&mut self, key: F)
    where
        K: Ord + ?Sized,
        F: Fn(&T) -> &K,
    {
        self.records.sort_by(|a, b| key(a).cmp(key(b)));
    }

    /// Sorts records by identifier, ascending lexicographic order.
    pub fn sort_by_identifier(&mut self) {
        self.sort_by(|r| r.id());
    }

    /// All records in their current order.
    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Record> Default for RecordIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
