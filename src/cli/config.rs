//! Server configuration file
//!
//! ```json
//! {
//!   "root_db": "./barelydb_data",
//!   "host": "127.0.0.1",
//!   "port": 3838,
//!   "cors_origins": ["http://localhost:5173"]
//! }
//! ```
//!
//! Every field is optional. Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root directory holding the databases
    #[serde(default)]
    pub root_db: Option<PathBuf>,

    #[serde(flatten)]
    pub http: HttpServerConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Apply command-line values on top of the file values
    pub fn with_overrides(
        mut self,
        root_db: Option<PathBuf>,
        host: Option<String>,
        port: Option<u16>,
    ) -> Self {
        if root_db.is_some() {
            self.root_db = root_db;
        }
        if let Some(host) = host {
            self.http.host = host;
        }
        if let Some(port) = port {
            self.http.port = port;
        }
        self
    }

    /// Root directory, required to serve
    pub fn root_db(&self) -> CliResult<&Path> {
        match self.root_db.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => Ok(path),
            _ => Err(CliError::missing_root()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_full_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("barelydb.json");
        let config = json!({
            "root_db": "/srv/data",
            "host": "127.0.0.1",
            "port": 4000,
            "cors_origins": ["http://localhost:5173"]
        });
        fs::write(&path, config.to_string()).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.root_db().unwrap(), Path::new("/srv/data"));
        assert_eq!(config.http.socket_addr(), "127.0.0.1:4000");
        assert_eq!(config.http.cors_origins.len(), 1);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("barelydb.json");
        fs::write(&path, "{}").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.http, HttpServerConfig::default());
        assert!(config.root_db().is_err());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("barelydb.json");
        fs::write(&path, "{ nope").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config {
            root_db: Some(PathBuf::from("from-file")),
            http: HttpServerConfig::with_port(4000),
        }
        .with_overrides(Some(PathBuf::from("from-flag")), None, Some(5000));

        assert_eq!(config.root_db.as_deref(), Some(Path::new("from-flag")));
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.http.host, "0.0.0.0");
    }

    #[test]
    fn test_missing_root_is_error() {
        let config = Config::default().with_overrides(None, None, None);
        assert!(config.root_db().is_err());
    }
}
