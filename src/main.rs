//! propdiag binary
//!
//! Exits with status 1 and the coded error on stderr when a command fails.

use propdiag::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
