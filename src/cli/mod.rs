//! CLI module for propdiag
//!
//! Provides command-line interface for:
//! - check: Load a knowledge base and report its contents
//! - interview: Interactive yes/no interview
//! - diagnose: One-shot diagnosis of facts read from stdin
//! - serve: JSON-lines request loop over one session

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod protocol;

pub use args::{Cli, Command, Source};
pub use commands::{boot, check, diagnose, handle_request, interview, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult, ProtocolError};
pub use io::{read_document, read_requests, write_error, write_response};
pub use protocol::Request;
