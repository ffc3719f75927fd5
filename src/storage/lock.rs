//! Per-table mutual exclusion
//!
//! The load, mutate, write sequence on a table file is not atomic. Without
//! coordination two concurrent writers each load the old set and the last
//! write silently discards the other's change. Every access to a table runs
//! under that table's mutex so the sequence is serialized within this process.
//!
//! Other processes touching the same files are not coordinated.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Registry of one mutex per table path
#[derive(Debug, Default)]
pub struct TableLocks {
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl TableLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Run `f` while holding the lock for `path`.
    ///
    /// A panic inside a previous holder does not leave the table unusable;
    /// the guarded data is `()` so a poisoned lock is simply reacquired.
    pub fn with_lock<R>(&self, path: &Path, f: impl FnOnce() -> R) -> R {
        let lock = self.lock_for(path);
        let _guard: MutexGuard<'_, ()> = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Number of tables that have been locked at least once
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
