use std::collections::{BTreeMap, HashMap};

use super::entry::{DatabaseEntry, EntryId, EntryKind};

/// Read-only lookups into the host's database tables.
pub trait DatabaseOracle: Send + Sync {
    fn entry(&self, kind: EntryKind, id: EntryId) -> Option<&DatabaseEntry>;

    /// Returns every entry of a table in id order.
    fn entries(&self, kind: EntryKind) -> Vec<&DatabaseEntry>;
}

/// In-memory database tables keyed by entry id.
#[derive(Clone, Debug, Default)]
pub struct Database {
    tables: HashMap<EntryKind, BTreeMap<EntryId, DatabaseEntry>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any previous entry with the same id.
    pub fn insert(&mut self, kind: EntryKind, entry: DatabaseEntry) {
        self.tables.entry(kind).or_default().insert(entry.id, entry);
    }

    /// Builder-style variant of [`Database::insert`] for a whole table.
    pub fn with_table(
        mut self,
        kind: EntryKind,
        entries: impl IntoIterator<Item = DatabaseEntry>,
    ) -> Self {
        for entry in entries {
            self.insert(kind, entry);
        }
        self
    }

    /// Number of entries in a table.
    pub fn len(&self, kind: EntryKind) -> usize {
        self.tables.get(&kind).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(BTreeMap::is_empty)
    }
}

impl DatabaseOracle for Database {
    fn entry(&self, kind: EntryKind, id: EntryId) -> Option<&DatabaseEntry> {
        self.tables.get(&kind)?.get(&id)
    }

    fn entries(&self, kind: EntryKind) -> Vec<&DatabaseEntry> {
        self.tables
            .get(&kind)
            .map(|table| table.values().collect())
            .unwrap_or_default()
    }
}
