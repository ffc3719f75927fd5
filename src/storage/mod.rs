//! Table storage engine
//!
//! Databases are directories under a root, tables are `<table>.json` files
//! holding one JSON object of record id to record body.
//!
//! ```text
//! <root>/
//!   shop/
//!     orders.json
//!     customers.json
//! ```
//!
//! Tables are always read and written whole, and every access to one table
//! is serialized through [`TableLocks`].

mod errors;
mod lock;
mod paths;
mod table;

pub use errors::{StorageError, StorageResult};
pub use lock::TableLocks;
pub use paths::{resolve_root, validate_name, PathResolver, EMPTY_TABLE, TABLE_EXTENSION};
pub use table::{DocumentSet, TableStore};
