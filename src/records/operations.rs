//! # Record Operations
//!
//! CRUD state transitions over an already loaded [`DocumentSet`]. These
//! functions never touch the filesystem; persisting a mutated set is the
//! caller's job.

use serde_json::{Map, Value};

use super::errors::{RecordError, RecordResult};
use crate::storage::DocumentSet;

/// Field the record id is stored and injected under
pub const ID_FIELD: &str = "id";

/// All records of the table
pub fn list(docs: &DocumentSet) -> &DocumentSet {
    docs
}

/// One record with its id injected as the `id` field
pub fn get_one(docs: &DocumentSet, id: &str) -> RecordResult<Value> {
    let value = docs
        .get(id)
        .ok_or_else(|| RecordError::RecordNotFound(id.to_string()))?;

    let mut record = value
        .as_object()
        .cloned()
        .ok_or_else(|| RecordError::InvalidFormat(id.to_string()))?;

    record.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    Ok(Value::Object(record))
}

/// Insert a new record keyed by the body's `id` field.
///
/// The body is stored as given, `id` included. Never overwrites.
pub fn create(docs: &mut DocumentSet, body: Map<String, Value>) -> RecordResult<(String, Value)> {
    let id = body
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(RecordError::MissingId)?;

    if docs.contains_key(&id) {
        return Err(RecordError::Conflict(id));
    }

    let record = Value::Object(body);
    docs.insert(id.clone(), record.clone());
    Ok((id, record))
}

/// Overwrite an existing record in full
pub fn replace(docs: &mut DocumentSet, id: &str, body: Map<String, Value>) -> RecordResult<Value> {
    let slot = docs
        .get_mut(id)
        .ok_or_else(|| RecordError::RecordNotFound(id.to_string()))?;

    *slot = Value::Object(body);
    Ok(slot.clone())
}

/// Shallow-merge `body` into an existing object record.
///
/// Top-level fields of `body` overwrite or add; nested values are replaced
/// wholesale, not merged.
pub fn patch(docs: &mut DocumentSet, id: &str, body: Map<String, Value>) -> RecordResult<Value> {
    let slot = docs
        .get_mut(id)
        .ok_or_else(|| RecordError::RecordNotFound(id.to_string()))?;

    let existing = slot
        .as_object_mut()
        .ok_or_else(|| RecordError::InvalidFormat(id.to_string()))?;

    for (field, value) in body {
        existing.insert(field, value);
    }

    Ok(slot.clone())
}
