//! SQLite search index.
//!
//! The offline browser queries a `searchIndex` table keyed by
//! `(name, type, path)`. Duplicate discoveries are expected (the engine does
//! not deduplicate), so insertion uses `INSERT OR IGNORE` against a unique
//! index and conflicts vanish silently.

use std::fs;
use std::path::Path;

use rusqlite::{Connection, params};

use crate::engine::Reference;
use crate::error::Result;

/// An open search index for one build.
pub struct SearchIndex {
    conn: Connection,
}

impl SearchIndex {
    /// Create the index file from scratch, replacing any previous build's.
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE searchIndex(id INTEGER PRIMARY KEY, name TEXT, type TEXT, path TEXT);
             CREATE UNIQUE INDEX anchor ON searchIndex (name, type, path);",
        )?;
        Ok(Self { conn })
    }

    /// Insert one reference; exact duplicates are dropped silently.
    pub fn insert(&self, reference: &Reference) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO searchIndex(name, type, path) VALUES (?1, ?2, ?3)",
            params![reference.name, reference.entry_type, reference.href],
        )?;
        Ok(())
    }

    /// Number of indexed entries.
    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM searchIndex", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(name: &str, entry_type: &str, href: &str) -> Reference {
        Reference {
            name: name.to_string(),
            entry_type: entry_type.to_string(),
            href: href.to_string(),
        }
    }

    #[test]
    fn duplicate_rows_are_dropped_silently() {
        let dir = tempfile::tempdir().unwrap();
        let index = SearchIndex::create(&dir.path().join("docSet.dsidx")).unwrap();

        let r = reference("connect", "Function", "api.html#autolink-0");
        index.insert(&r).unwrap();
        index.insert(&r).unwrap();

        assert_eq!(index.len().unwrap(), 1);
    }

    #[test]
    fn distinct_types_for_one_name_both_survive() {
        let dir = tempfile::tempdir().unwrap();
        let index = SearchIndex::create(&dir.path().join("docSet.dsidx")).unwrap();

        index
            .insert(&reference("connect", "Function", "api.html#autolink-0"))
            .unwrap();
        index
            .insert(&reference("connect", "Deprecated", "api.html#autolink-0"))
            .unwrap();

        assert_eq!(index.len().unwrap(), 2);
    }

    #[test]
    fn create_replaces_a_previous_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docSet.dsidx");

        let index = SearchIndex::create(&path).unwrap();
        index
            .insert(&reference("stale", "Guide", "old.html#autolink-0"))
            .unwrap();
        drop(index);

        let index = SearchIndex::create(&path).unwrap();
        assert!(index.is_empty().unwrap());
    }
}
