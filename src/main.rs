//! barelydb CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`. Any startup error is
//! printed to stderr and the process exits non-zero.

use barelydb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
