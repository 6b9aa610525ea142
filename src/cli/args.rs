//! CLI argument definitions using clap
//!
//! Commands:
//! - propdiag check --kb <path> [--normalize <out>]
//! - propdiag interview --kb <path> [--threshold <pct>]
//! - propdiag diagnose --kb <path> [--threshold <pct>]
//! - propdiag serve --kb <path>
//!
//! Every command also accepts `--config <path>`; flags override the file.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// propdiag - adaptive propositional-logic diagnosis
#[derive(Parser, Debug)]
#[command(name = "propdiag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct Source {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the knowledge base document
    #[arg(long)]
    pub kb: Option<PathBuf>,

    /// Minimum log severity (trace, info, warn, error, fatal)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a knowledge base and report its contents
    Check {
        #[command(flatten)]
        source: Source,

        /// Write the loaded knowledge base to this path with English keys
        #[arg(long, value_name = "OUT")]
        normalize: Option<PathBuf>,
    },

    /// Run an interactive yes/no interview
    Interview {
        #[command(flatten)]
        source: Source,

        /// Minimum percentage for a diagnosis
        #[arg(long)]
        threshold: Option<f64>,

        /// Questions asked before the first answer
        #[arg(long)]
        initial_batch: Option<usize>,

        /// Questions queued after each answer
        #[arg(long)]
        batch_size: Option<usize>,
    },

    /// Read a JSON object of facts from stdin and print diagnoses
    Diagnose {
        #[command(flatten)]
        source: Source,

        /// Minimum percentage for a diagnosis
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Serve JSON-lines requests from stdin against one session
    Serve {
        #[command(flatten)]
        source: Source,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
