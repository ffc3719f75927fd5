//! Path resolution for databases and tables
//!
//! A database is a directory directly under the root, a table is a
//! `<table>.json` file inside it. Existence checks and creation are separate
//! filesystem calls; creation tolerates a concurrent creator winning the race.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::errors::{StorageError, StorageResult};

/// File suffix of a table
pub const TABLE_EXTENSION: &str = "json";

/// Content of a freshly created table
pub const EMPTY_TABLE: &[u8] = b"{}\n";

/// Maps database and table names to locations under a root directory
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver over an existing root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn database_path(&self, database: &str) -> PathBuf {
        self.root.join(database)
    }

    pub fn table_path(&self, database: &str, table: &str) -> PathBuf {
        self.database_path(database)
            .join(format!("{}.{}", table, TABLE_EXTENSION))
    }

    /// True iff the database path exists and is a directory
    pub fn database_exists(&self, database: &str) -> bool {
        fs::metadata(self.database_path(database))
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }

    /// True iff the table path exists and is a regular file
    pub fn table_exists(&self, database: &str, table: &str) -> bool {
        fs::metadata(self.table_path(database, table))
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    /// Create the database directory if absent. The root must already exist.
    pub fn ensure_database(&self, database: &str) -> StorageResult<PathBuf> {
        let path = self.database_path(database);
        if self.database_exists(database) {
            return Ok(path);
        }

        match fs::create_dir(&path) {
            Ok(()) => {
                debug!(database, path = %path.display(), "created database");
                Ok(path)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(path),
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }

    /// Create the table file with `{}\n` if absent
    pub fn ensure_table(&self, database: &str, table: &str) -> StorageResult<PathBuf> {
        let path = self.table_path(database, table);
        if self.table_exists(database, table) {
            return Ok(path);
        }

        let created = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .and_then(|mut file| file.write_all(EMPTY_TABLE));

        match created {
            Ok(()) => {
                debug!(database, table, path = %path.display(), "created table");
                Ok(path)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_file() => Ok(path),
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }
}

/// Resolve the root directory to an absolute path, creating it if missing.
///
/// Relative paths are taken relative to the current working directory.
pub fn resolve_root(dir: &Path) -> StorageResult<PathBuf> {
    let root = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| StorageError::io(dir, e))?;
        cwd.join(dir)
    };

    if !root.is_dir() {
        fs::create_dir_all(&root).map_err(|e| StorageError::io(&root, e))?;
        info!(root = %root.display(), "created root database directory");
    }

    Ok(root)
}

/// Reject names that are not a single, normal path component.
pub fn validate_name(name: &str) -> StorageResult<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        Err(StorageError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}
