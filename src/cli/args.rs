//! CLI argument definitions using clap
//!
//! Commands:
//! - barelydb serve -d <root> [--config <path>] [--host <host>] [--port <port>]
//! - barelydb create -d <root> <database> [table]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable read when `--root-db` is not given
pub const ROOT_DB_ENV: &str = "BARELYDB_ROOT_DB";

/// barelydb - JSON tables on disk, served over HTTP
#[derive(Parser, Debug)]
#[command(name = "barelydb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(global = true, short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the databases under the root directory over HTTP
    Serve {
        /// Optional JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Root directory holding the databases (relative or absolute)
        #[arg(short = 'd', long = "root-db", env = ROOT_DB_ENV)]
        root_db: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create a database, and optionally an empty table inside it
    Create {
        /// Root directory holding the databases (relative or absolute)
        #[arg(short = 'd', long = "root-db", env = ROOT_DB_ENV)]
        root_db: PathBuf,

        /// Database name
        database: String,

        /// Table name
        table: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["barelydb", "serve", "-d", "data", "--port", "9000"]).unwrap();
        match cli.command {
            Command::Serve { root_db, port, host, config } => {
                assert_eq!(root_db, Some(PathBuf::from("data")));
                assert_eq!(port, Some(9000));
                assert!(host.is_none());
                assert!(config.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_create_with_table() {
        let cli =
            Cli::try_parse_from(["barelydb", "create", "--root-db", "/srv/db", "shop", "orders"])
                .unwrap();
        match cli.command {
            Command::Create { root_db, database, table } => {
                assert_eq!(root_db, PathBuf::from("/srv/db"));
                assert_eq!(database, "shop");
                assert_eq!(table.as_deref(), Some("orders"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
