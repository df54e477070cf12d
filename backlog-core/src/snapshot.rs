//! In-memory [`RecordView`] over a loaded library.

use std::collections::{BTreeSet, HashMap};

use crate::platform::PlatformGroup;
use crate::record::{Record, RecordKey, RecordView};

/// An indexed copy of the library, built once per sync.
#[derive(Debug, Default, Clone)]
pub struct LibrarySnapshot {
    records: Vec<Record>,
    by_identifier: HashMap<u64, usize>,
    by_name: HashMap<(PlatformGroup, String), usize>,
}

impl LibrarySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from stored records.
    ///
    /// Records that collide with an earlier one on identifier or on
    /// `(group, name)` are dropped from the index and logged; the store
    /// constraints make that unreachable for data loaded from the database.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut snapshot = Self::new();
        for record in records {
            snapshot.insert(record);
        }
        snapshot
    }

    /// Add one record. Returns `false` if it collides with an indexed record.
    pub fn insert(&mut self, record: Record) -> bool {
        let name_key = (record.platform.group(), record.name.clone());
        let id_taken = record
            .identifier
            .is_some_and(|id| self.by_identifier.contains_key(&id));
        if id_taken || self.by_name.contains_key(&name_key) {
            log::warn!(
                "Duplicate library entry ignored: {} ({})",
                record.name,
                record.platform
            );
            return false;
        }

        let index = self.records.len();
        if let Some(id) = record.identifier {
            self.by_identifier.insert(id, index);
        }
        self.by_name.insert(name_key, index);
        self.records.push(record);
        true
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordView for LibrarySnapshot {
    fn lookup(&self, key: RecordKey<'_>, group: PlatformGroup) -> Option<&Record> {
        let index = match key {
            RecordKey::Id(id) => *self.by_identifier.get(&id)?,
            RecordKey::Name(name) => *self.by_name.get(&(group, name.to_string()))?,
        };
        let record = &self.records[index];
        (record.platform.group() == group).then_some(record)
    }

    fn identifier_in_use(&self, identifier: u64) -> bool {
        self.by_identifier.contains_key(&identifier)
    }

    fn all_keys_for_platform(&self, group: PlatformGroup) -> BTreeSet<String> {
        self.records
            .iter()
            .filter(|r| r.platform.group() == group)
            .map(|r| r.name.clone())
            .collect()
    }

    fn known_names(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }
}
