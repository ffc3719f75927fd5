//! # HTTP Server Module
//!
//! Thin adapter from HTTP verbs to record operations.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /{database}/{table}` - List all records
//! - `POST /{database}/{table}` - Create a record (body must carry `id`)
//! - `GET /{database}/{table}/{id}` - Get one record (`?fields=a,b` to project)
//! - `PUT /{database}/{table}/{id}` - Replace a record
//! - `PATCH /{database}/{table}/{id}` - Shallow-merge into a record

pub mod config;
pub mod errors;
pub mod health_routes;
pub mod record_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
