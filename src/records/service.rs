//! # Record Service
//!
//! One request is one transaction: check the database and table exist,
//! take the table lock, load, apply the operation, and persist the whole
//! set if it changed. Nothing is cached between requests.

use serde_json::{Map, Value};
use tracing::debug;

use super::errors::{RecordError, RecordResult};
use super::operations;
use crate::storage::{validate_name, DocumentSet, PathResolver, TableStore};

/// Outcome of a successful create, replace, or patch
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub id: String,
    pub record: Value,
}

/// CRUD entry point used by the HTTP layer
#[derive(Debug)]
pub struct RecordService {
    tables: TableStore,
}

impl RecordService {
    /// Create a service over an existing root directory
    pub fn new(paths: PathResolver) -> Self {
        Self {
            tables: TableStore::new(paths),
        }
    }

    pub fn tables(&self) -> &TableStore {
        &self.tables
    }

    /// Create a database directory if absent
    pub fn create_database(&self, database: &str) -> RecordResult<()> {
        validate_name(database)?;
        self.tables.paths().ensure_database(database)?;
        Ok(())
    }

    /// Create a database and an empty table if absent
    pub fn create_table(&self, database: &str, table: &str) -> RecordResult<()> {
        validate_name(database)?;
        validate_name(table)?;
        let paths = self.tables.paths();
        paths.ensure_database(database)?;
        self.tables
            .with_table_lock(database, table, || paths.ensure_table(database, table))?;
        Ok(())
    }

    pub fn list(&self, database: &str, table: &str) -> RecordResult<DocumentSet> {
        self.table(database, table)?.list()
    }

    pub fn get(&self, database: &str, table: &str, id: &str) -> RecordResult<Value> {
        self.table(database, table)?.get(id)
    }

    pub fn create(
        &self,
        database: &str,
        table: &str,
        body: Map<String, Value>,
    ) -> RecordResult<Mutation> {
        self.table(database, table)?.create(body)
    }

    pub fn replace(
        &self,
        database: &str,
        table: &str,
        id: &str,
        body: Map<String, Value>,
    ) -> RecordResult<Mutation> {
        self.table(database, table)?.replace(id, body)
    }

    pub fn patch(
        &self,
        database: &str,
        table: &str,
        id: &str,
        body: Map<String, Value>,
    ) -> RecordResult<Mutation> {
        self.table(database, table)?.patch(id, body)
    }

    /// Open an existing table. Fails unless both names are valid and the
    /// database and table exist.
    pub fn table<'a>(&'a self, database: &'a str, table: &'a str) -> RecordResult<Table<'a>> {
        validate_name(database)?;
        validate_name(table)?;

        let paths = self.tables.paths();
        if !paths.database_exists(database) {
            return Err(RecordError::DatabaseNotFound(database.to_string()));
        }
        if !paths.table_exists(database, table) {
            return Err(RecordError::TableNotFound(format!("{}.{}", database, table)));
        }

        Ok(Table {
            tables: &self.tables,
            database,
            table,
        })
    }
}

/// A table whose existence has been checked
///
/// Each call is its own transaction under the table lock.
#[derive(Debug)]
pub struct Table<'a> {
    tables: &'a TableStore,
    database: &'a str,
    table: &'a str,
}

impl Table<'_> {
    pub fn list(&self) -> RecordResult<DocumentSet> {
        self.read(|docs| Ok(operations::list(docs).clone()))
    }

    pub fn get(&self, id: &str) -> RecordResult<Value> {
        self.read(|docs| operations::get_one(docs, id))
    }

    pub fn create(&self, body: Map<String, Value>) -> RecordResult<Mutation> {
        self.mutate(|docs| {
            let (id, record) = operations::create(docs, body)?;
            Ok(Mutation { id, record })
        })
    }

    pub fn replace(&self, id: &str, body: Map<String, Value>) -> RecordResult<Mutation> {
        self.mutate(|docs| {
            let record = operations::replace(docs, id, body)?;
            Ok(Mutation {
                id: id.to_string(),
                record,
            })
        })
    }

    pub fn patch(&self, id: &str, body: Map<String, Value>) -> RecordResult<Mutation> {
        self.mutate(|docs| {
            let record = operations::patch(docs, id, body)?;
            Ok(Mutation {
                id: id.to_string(),
                record,
            })
        })
    }

    fn read<T>(&self, op: impl FnOnce(&DocumentSet) -> RecordResult<T>) -> RecordResult<T> {
        let (database, table) = (self.database, self.table);
        self.tables.with_table_lock(database, table, || {
            let docs = self.tables.load(database, table)?;
            debug!(database, table, records = docs.len(), "read table");
            op(&docs)
        })
    }

    fn mutate<T>(&self, op: impl FnOnce(&mut DocumentSet) -> RecordResult<T>) -> RecordResult<T> {
        let (database, table) = (self.database, self.table);
        self.tables.with_table_lock(database, table, || {
            let mut docs = self.tables.load(database, table)?;
            let outcome = op(&mut docs)?;
            self.tables.write(database, table, &docs)?;
            debug!(database, table, records = docs.len(), "persisted table");
            Ok(outcome)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn service_with_table(temp: &TempDir) -> RecordService {
        let service = RecordService::new(PathResolver::new(temp.path()));
        service.create_table("shop", "orders").unwrap();
        service
    }

    #[test]
    fn test_missing_database() {
        let temp = TempDir::new().unwrap();
        let service = RecordService::new(PathResolver::new(temp.path()));

        let result = service.list("shop", "orders");
        assert!(matches!(result, Err(RecordError::DatabaseNotFound(_))));
        assert!(!temp.path().join("shop").exists());
    }

    #[test]
    fn test_missing_table_is_not_created() {
        let temp = TempDir::new().unwrap();
        let service = RecordService::new(PathResolver::new(temp.path()));
        service.create_database("shop").unwrap();

        let result = service.create("shop", "orders", body(json!({"id": "o1"})));
        assert!(matches!(result, Err(RecordError::TableNotFound(_))));
        assert!(!temp.path().join("shop/orders.json").exists());
    }

    #[test]
    fn test_rejects_traversal_names() {
        let temp = TempDir::new().unwrap();
        let service = RecordService::new(PathResolver::new(temp.path()));

        let result = service.list("..", "orders");
        assert!(matches!(result, Err(RecordError::InvalidName(_))));
    }

    #[test]
    fn test_create_persists_whole_set() {
        let temp = TempDir::new().unwrap();
        let service = service_with_table(&temp);

        service.create("shop", "orders", body(json!({"id": "o1", "total": 42}))).unwrap();
        service.create("shop", "orders", body(json!({"id": "o2", "total": 7}))).unwrap();

        let on_disk: Value =
            serde_json::from_slice(&fs::read(temp.path().join("shop/orders.json")).unwrap())
                .unwrap();
        assert_eq!(
            on_disk,
            json!({
                "o1": {"id": "o1", "total": 42},
                "o2": {"id": "o2", "total": 7}
            })
        );
    }

    #[test]
    fn test_failed_mutation_does_not_write() {
        let temp = TempDir::new().unwrap();
        let service = service_with_table(&temp);
        let path = temp.path().join("shop/orders.json");

        let result = service.replace("shop", "orders", "o1", body(json!({"total": 1})));

        assert!(matches!(result, Err(RecordError::RecordNotFound(_))));
        assert_eq!(fs::read_to_string(path).unwrap(), "{}\n");
    }

    #[test]
    fn test_corrupt_table_is_contained_error() {
        let temp = TempDir::new().unwrap();
        let service = service_with_table(&temp);
        fs::write(temp.path().join("shop/orders.json"), b"{oops").unwrap();

        let result = service.get("shop", "orders", "o1");

        let err = result.unwrap_err();
        assert!(err.is_internal());
        assert!(matches!(err, RecordError::Storage(_)));
    }

    #[test]
    fn test_patch_returns_merged_record() {
        let temp = TempDir::new().unwrap();
        let service = service_with_table(&temp);
        service.create("shop", "orders", body(json!({"id": "o1", "total": 42}))).unwrap();

        let mutation = service
            .patch("shop", "orders", "o1", body(json!({"total": 50})))
            .unwrap();

        assert_eq!(mutation.id, "o1");
        assert_eq!(mutation.record, json!({"id": "o1", "total": 50}));
    }

    #[test]
    fn test_table_handle_checks_existence_once() {
        let temp = TempDir::new().unwrap();
        let service = service_with_table(&temp);
        let orders = service.table("shop", "orders").unwrap();

        orders.create(body(json!({"id": "o1", "total": 42}))).unwrap();
        orders.patch("o1", body(json!({"total": 50}))).unwrap();

        assert_eq!(orders.get("o1").unwrap(), json!({"id": "o1", "total": 50}));
        assert!(matches!(
            service.table("shop", "missing"),
            Err(RecordError::TableNotFound(_))
        ));
    }
}
