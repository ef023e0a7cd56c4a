//! Host database table loader.

use std::path::Path;

use shop_core::{Database, DatabaseEntry, EntryKind};

use crate::loaders::{LoadResult, read_file};

/// Loader for the host's JSON database tables.
///
/// Each table is a JSON array indexed by entry id, with `null` at index 0:
///
/// ```json
/// [null, {"id": 1, "name": "Fire", "note": "<buy cost gold: 250>", ...}]
/// ```
///
/// Only `id`, `name` and `note` are read; all other fields are ignored.
pub struct DatabaseLoader;

impl DatabaseLoader {
    /// File name of a table inside the project's `data/` directory.
    pub const fn file_name(kind: EntryKind) -> &'static str {
        match kind {
            EntryKind::Item => "Items.json",
            EntryKind::Weapon => "Weapons.json",
            EntryKind::Armor => "Armors.json",
            EntryKind::Skill => "Skills.json",
            EntryKind::State => "States.json",
        }
    }

    /// Load one table, skipping `null` slots.
    pub fn load_table(path: &Path) -> LoadResult<Vec<DatabaseEntry>> {
        let content = read_file(path)?;
        Self::parse_table(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse table {}: {}", path.display(), e))
    }

    pub fn parse_table(content: &str) -> LoadResult<Vec<DatabaseEntry>> {
        let slots: Vec<Option<DatabaseEntry>> = serde_json::from_str(content)?;
        Ok(slots.into_iter().flatten().collect())
    }

    /// Load every table from a `data/` directory.
    ///
    /// A missing table file is logged and treated as empty; a malformed one is an error.
    pub fn load(data_dir: &Path) -> LoadResult<Database> {
        let mut database = Database::new();

        for kind in EntryKind::ALL {
            let path = data_dir.join(Self::file_name(kind));
            if !path.exists() {
                tracing::warn!("Database table {} not found, treating as empty", path.display());
                continue;
            }

            let entries = Self::load_table(&path)?;
            tracing::debug!("Loaded {} {} entries from {}", entries.len(), kind, path.display());
            for entry in entries {
                database.insert(kind, entry);
            }
        }

        Ok(database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::EntryId;

    #[test]
    fn parses_host_table_layout() {
        let json = r#"[
            null,
            {"id": 1, "name": "Fire", "note": "<buy cost gold: 250>", "mpCost": 5},
            null,
            {"id": 3, "name": "Ice"}
        ]"#;
        let entries = DatabaseLoader::parse_table(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, EntryId(1));
        assert_eq!(entries[0].note, "<buy cost gold: 250>");
        assert_eq!(entries[1].name, "Ice");
        assert!(entries[1].note.is_empty());
    }

    #[test]
    fn rejects_entries_without_id() {
        assert!(DatabaseLoader::parse_table(r#"[null, {"name": "Nameless"}]"#).is_err());
    }
}
