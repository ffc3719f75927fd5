//! barelydb - a bare-bones JSON document store served over HTTP
//!
//! Each database is a directory under a root, each table a `<table>.json`
//! file mapping record ids to record bodies.
//!
//! - [`storage`]: path resolution, whole-table load and write, table locks
//! - [`records`]: list, get, create, replace, and patch semantics
//! - [`http_server`]: axum routes mapping HTTP verbs to record operations
//! - [`cli`]: `serve` and `create` commands

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod records;
pub mod storage;
