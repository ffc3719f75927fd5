//! Field projection: keep only selected top-level fields of a record.
//!
//! Only applied to single-record reads through the `fields` query
//! parameter. Non-object values are returned unchanged.

use serde_json::{Map, Value};

/// Parse a comma-separated field list, dropping empty entries
pub fn parse_fields(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keep only `fields` of an object record. Unknown fields are skipped.
/// An empty field list returns the record unchanged.
pub fn project_fields(record: Value, fields: &[String]) -> Value {
    if fields.is_empty() {
        return record;
    }

    match record {
        Value::Object(mut obj) => {
            let mut projected = Map::new();
            for field in fields {
                if let Some(value) = obj.remove(field) {
                    projected.insert(field.clone(), value);
                }
            }
            Value::Object(projected)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_fields() {
        assert_eq!(parse_fields("name, total,,"), vec!["name", "total"]);
        assert!(parse_fields("").is_empty());
    }

    #[test]
    fn test_projects_requested_fields() {
        let record = json!({"id": "o1", "total": 42, "note": "x"});
        let fields = parse_fields("id,total,missing");
        assert_eq!(project_fields(record, &fields), json!({"id": "o1", "total": 42}));
    }

    #[test]
    fn test_empty_projection_is_identity() {
        let record = json!({"id": "o1", "total": 42});
        assert_eq!(project_fields(record.clone(), &[]), record);
    }

    #[test]
    fn test_non_object_passes_through() {
        let record = json!([1, 2]);
        assert_eq!(project_fields(record.clone(), &["a".to_string()]), record);
    }
}
