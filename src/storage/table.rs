//! Table load and persist
//!
//! A table is read fully into memory on every request and written back in
//! full after every mutation. There is no incremental update.
//!
//! The write is a single `fs::write` over the existing file, not a
//! temp-file-and-rename. A crash mid-write can leave a truncated table,
//! which the next load reports as a decode error.

use std::fs;

use serde_json::{Map, Value};
use tracing::trace;

use super::errors::{StorageError, StorageResult};
use super::lock::TableLocks;
use super::paths::PathResolver;

/// In-memory content of one table: record id to record body
pub type DocumentSet = Map<String, Value>;

/// Loads and persists whole tables under a root directory
#[derive(Debug)]
pub struct TableStore {
    paths: PathResolver,
    locks: TableLocks,
}

impl TableStore {
    pub fn new(paths: PathResolver) -> Self {
        Self {
            paths,
            locks: TableLocks::new(),
        }
    }

    pub fn paths(&self) -> &PathResolver {
        &self.paths
    }

    /// Read the full document set, creating an empty table if absent
    pub fn load(&self, database: &str, table: &str) -> StorageResult<DocumentSet> {
        let path = self.paths.ensure_table(database, table)?;

        let contents = fs::read(&path).map_err(|e| StorageError::io(&path, e))?;
        let docs: DocumentSet =
            serde_json::from_slice(&contents).map_err(|e| StorageError::decode(&path, e))?;

        trace!(database, table, records = docs.len(), "loaded table");
        Ok(docs)
    }

    /// Overwrite the table with the full document set
    pub fn write(&self, database: &str, table: &str, docs: &DocumentSet) -> StorageResult<()> {
        let path = self.paths.ensure_table(database, table)?;

        let mut encoded =
            serde_json::to_vec_pretty(docs).map_err(|e| StorageError::encode(&path, e))?;
        encoded.push(b'\n');

        fs::write(&path, encoded).map_err(|e| StorageError::io(&path, e))?;

        trace!(database, table, records = docs.len(), "wrote table");
        Ok(())
    }

    /// Run `f` with exclusive access to one table
    pub fn with_table_lock<R>(&self, database: &str, table: &str, f: impl FnOnce() -> R) -> R {
        let path = self.paths.table_path(database, table);
        self.locks.with_lock(&path, f)
    }
}
