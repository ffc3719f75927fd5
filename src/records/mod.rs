//! # Records
//!
//! CRUD semantics over table storage.
//!
//! - [`operations`]: pure state transitions on an in-memory document set
//! - [`RecordService`]: the per-request load, decide, persist transaction
//! - [`projection`]: top-level field selection for single-record reads

mod errors;
pub mod operations;
pub mod projection;
mod service;

pub use errors::{RecordError, RecordResult};
pub use operations::ID_FIELD;
pub use projection::{parse_fields, project_fields};
pub use service::{Mutation, RecordService, Table};
