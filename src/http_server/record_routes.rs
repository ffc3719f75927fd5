//! Record HTTP Routes
//!
//! CRUD endpoints over `/{database}/{table}` and `/{database}/{table}/{id}`.
//! Storage work is synchronous and runs on the blocking pool.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::errors::{ApiError, ApiResult};
use crate::records::{parse_fields, project_fields, Mutation, RecordService};
use crate::storage::DocumentSet;

// ==================
// Shared State
// ==================

/// Record state shared across handlers
pub struct RecordState {
    pub service: RecordService,
}

impl RecordState {
    pub fn new(service: RecordService) -> Self {
        Self { service }
    }
}

// ==================
// Response Types
// ==================

/// Envelope returned by create, replace, and patch
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub message: String,
    pub data: Value,
    pub id: String,
    pub table: String,
    pub database: String,
}

impl MutationResponse {
    fn new(message: &str, mutation: Mutation, database: String, table: String) -> Self {
        Self {
            message: message.to_string(),
            data: mutation.record,
            id: mutation.id,
            table,
            database,
        }
    }
}

// ==================
// Record Routes
// ==================

/// Create record routes
pub fn record_routes(state: Arc<RecordState>) -> Router {
    Router::new()
        .route("/:database/:table", get(list_handler).post(create_handler))
        .route(
            "/:database/:table/:id",
            get(get_handler).put(replace_handler).patch(patch_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Run a storage call on the blocking pool
async fn run_blocking<T, F>(state: Arc<RecordState>, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&RecordService) -> ApiResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&state.service))
        .await
        .map_err(|e| ApiError::Task(e.to_string()))?
}

type PathArgs<T> = Result<Path<T>, PathRejection>;
type QueryArgs = Result<Query<HashMap<String, String>>, QueryRejection>;
type BodyBytes = Result<Bytes, BytesRejection>;

/// Request bodies must be JSON objects
fn parse_body(body: &[u8]) -> ApiResult<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::InvalidBody),
    }
}

// ==================
// Handlers
// ==================

async fn list_handler(
    State(state): State<Arc<RecordState>>,
    path: PathArgs<(String, String)>,
    query: QueryArgs,
) -> ApiResult<Json<DocumentSet>> {
    let Path((database, table)) = path?;
    let Query(query) = query?;
    debug!(%database, %table, ?query, "GET table");

    let docs = run_blocking(state, move |service| {
        Ok(service.list(&database, &table)?)
    })
    .await?;

    Ok(Json(docs))
}

async fn get_handler(
    State(state): State<Arc<RecordState>>,
    path: PathArgs<(String, String, String)>,
    query: QueryArgs,
) -> ApiResult<Json<Value>> {
    let Path((database, table, id)) = path?;
    let Query(query) = query?;
    debug!(%database, %table, %id, ?query, "GET record");

    let record = run_blocking(state, move |service| {
        Ok(service.get(&database, &table, &id)?)
    })
    .await?;

    let record = match query.get("fields") {
        Some(fields) => project_fields(record, &parse_fields(fields)),
        None => record,
    };

    Ok(Json(record))
}

async fn create_handler(
    State(state): State<Arc<RecordState>>,
    path: PathArgs<(String, String)>,
    query: QueryArgs,
    body: BodyBytes,
) -> ApiResult<Json<MutationResponse>> {
    let Path((database, table)) = path?;
    let Query(query) = query?;
    debug!(%database, %table, ?query, "POST record");

    let (db, tbl) = (database.clone(), table.clone());
    let mutation = run_blocking(state, move |service| {
        let records = service.table(&db, &tbl)?;
        let body = parse_body(&body?)?;
        Ok(records.create(body)?)
    })
    .await?;

    Ok(Json(MutationResponse::new(
        "Record created successfully",
        mutation,
        database,
        table,
    )))
}

async fn replace_handler(
    State(state): State<Arc<RecordState>>,
    path: PathArgs<(String, String, String)>,
    query: QueryArgs,
    body: BodyBytes,
) -> ApiResult<Json<MutationResponse>> {
    let Path((database, table, id)) = path?;
    let Query(query) = query?;
    debug!(%database, %table, %id, ?query, "PUT record");

    let (db, tbl) = (database.clone(), table.clone());
    let mutation = run_blocking(state, move |service| {
        let records = service.table(&db, &tbl)?;
        let body = parse_body(&body?)?;
        Ok(records.replace(&id, body)?)
    })
    .await?;

    Ok(Json(MutationResponse::new(
        "Record updated successfully",
        mutation,
        database,
        table,
    )))
}

async fn patch_handler(
    State(state): State<Arc<RecordState>>,
    path: PathArgs<(String, String, String)>,
    query: QueryArgs,
    body: BodyBytes,
) -> ApiResult<Json<MutationResponse>> {
    let Path((database, table, id)) = path?;
    let Query(query) = query?;
    debug!(%database, %table, %id, ?query, "PATCH record");

    let (db, tbl) = (database.clone(), table.clone());
    let mutation = run_blocking(state, move |service| {
        let records = service.table(&db, &tbl)?;
        let body = parse_body(&body?)?;
        Ok(records.patch(&id, body)?)
    })
    .await?;

    Ok(Json(MutationResponse::new(
        "Record patched successfully",
        mutation,
        database,
        table,
    )))
}
