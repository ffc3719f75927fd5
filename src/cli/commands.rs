//! CLI command implementations
//!
//! Startup is synchronous: configuration and root directory resolution
//! happen before any request is accepted, and any failure there aborts.

use std::path::{Path, PathBuf};

use tracing::info;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::records::RecordService;
use crate::storage::{resolve_root, PathResolver};

/// Parse arguments, set up logging, and run the chosen command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            root_db,
            host,
            port,
        } => serve(config.as_deref(), root_db, host, port),
        Command::Create {
            root_db,
            database,
            table,
        } => create(&root_db, &database, table.as_deref()).map(|path| {
            println!("{}", path.display());
        }),
    }
}

/// Build the effective configuration from an optional file and flags
pub fn load_config(
    config_path: Option<&Path>,
    root_db: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<Config> {
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    Ok(config.with_overrides(root_db, host, port))
}

/// Start the HTTP server
///
/// 1. Build configuration (file, then flags)
/// 2. Resolve the root directory, creating it if missing
/// 3. Serve on a multi-threaded tokio runtime until stopped
pub fn serve(
    config_path: Option<&Path>,
    root_db: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<()> {
    let config = load_config(config_path, root_db, host, port)?;
    let requested = config.root_db()?;
    info!(root_db = %requested.display(), "starting barelydb");

    let root = resolve_root(requested)?;
    info!(root = %root.display(), "loading root database directory");

    let service = RecordService::new(PathResolver::new(root));
    let server = HttpServer::new(config.http, service);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Create a database and optionally an empty table. Returns the created path.
pub fn create(root_db: &Path, database: &str, table: Option<&str>) -> CliResult<PathBuf> {
    let root = resolve_root(root_db)?;
    let service = RecordService::new(PathResolver::new(root));

    let path = match table {
        Some(table) => {
            service.create_table(database, table)?;
            service.tables().paths().table_path(database, table)
        }
        None => {
            service.create_database(database)?;
            service.tables().paths().database_path(database)
        }
    };

    info!(path = %path.display(), "created");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_create_database_only() {
        let temp = TempDir::new().unwrap();

        let path = create(temp.path(), "shop", None).unwrap();

        assert_eq!(path, temp.path().join("shop"));
        assert!(path.is_dir());
    }

    #[test]
    fn test_create_table_creates_database_too() {
        let temp = TempDir::new().unwrap();

        let path = create(temp.path(), "shop", Some("orders")).unwrap();

        assert_eq!(path, temp.path().join("shop").join("orders.json"));
        assert_eq!(fs::read_to_string(path).unwrap(), "{}\n");
    }

    #[test]
    fn test_create_creates_missing_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("barelydb_data");

        create(&root, "shop", Some("orders")).unwrap();

        assert!(root.join("shop/orders.json").is_file());
    }

    #[test]
    fn test_create_rejects_bad_name() {
        let temp = TempDir::new().unwrap();

        let err = create(temp.path(), "..", None).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::CreateFailed);
    }

    #[test]
    fn test_serve_requires_root() {
        let err = serve(None, None, None, None).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_load_config_applies_flags() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("barelydb.json");
        fs::write(&config_path, r#"{"root_db": "a", "port": 4000}"#).unwrap();

        let config =
            load_config(Some(&config_path), None, Some("127.0.0.1".to_string()), None).unwrap();

        assert_eq!(config.root_db().unwrap(), Path::new("a"));
        assert_eq!(config.http.socket_addr(), "127.0.0.1:4000");
    }
}
