//! The keyed result of a multi-record lookup.

use std::collections::BTreeMap;
use std::collections::btree_map::{IntoValues, Values};

use super::identifier::Identifier;

/// Records keyed by the value of their lookup column.
///
/// This is a set: one record per distinct identifier, iterated in identifier
/// order. It says nothing about the order or multiplicity of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet<R> {
    records: BTreeMap<Identifier, R>,
}

impl<R> Default for RecordSet<R> {
    fn default() -> Self {
        RecordSet {
            records: BTreeMap::new(),
        }
    }
}

impl<R> RecordSet<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the record previously stored under `key`.
    pub fn insert(&mut self, key: Identifier, record: R) -> Option<R> {
        self.records.insert(key, record)
    }

    pub fn get(&self, key: &Identifier) -> Option<&R> {
        self.records.get(key)
    }

    pub fn contains(&self, key: &Identifier) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Identifier> {
        self.records.keys()
    }

    pub fn records(&self) -> Values<'_, Identifier, R> {
        self.records.values()
    }

    pub fn into_records(self) -> IntoValues<Identifier, R> {
        self.records.into_values()
    }
}

impl<R> FromIterator<(Identifier, R)> for RecordSet<R> {
    fn from_iter<I: IntoIterator<Item = (Identifier, R)>>(iter: I) -> Self {
        RecordSet {
            records: iter.into_iter().collect(),
        }
    }
}
