//! Configuration file
//!
//! A JSON object; every field is optional:
//!
//! ```json
//! {
//!   "knowledge_base": "respiratory.json",
//!   "diagnosis_threshold": 30.0,
//!   "initial_batch": 10,
//!   "batch_size": 5,
//!   "log_level": "warn"
//! }
//! ```
//!
//! A relative `knowledge_base` is resolved against the config file's
//! directory. Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::args::Source;
use super::errors::{CliError, CliResult};
use crate::engine::InterviewConfig;
use crate::observability::Severity;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Knowledge base document
    #[serde(default)]
    pub knowledge_base: Option<PathBuf>,

    /// Minimum percentage for a diagnosis (default 30)
    #[serde(default = "default_diagnosis_threshold")]
    pub diagnosis_threshold: f64,

    /// Questions queued before the first answer (default 10)
    #[serde(default = "default_initial_batch")]
    pub initial_batch: usize,

    /// Questions queued after each answer (default 5)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Minimum log severity (default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_diagnosis_threshold() -> f64 {
    30.0
}
fn default_initial_batch() -> usize {
    10
}
fn default_batch_size() -> usize {
    5
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            knowledge_base: None,
            diagnosis_threshold: default_diagnosis_threshold(),
            initial_batch: default_initial_batch(),
            batch_size: default_batch_size(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        if let (Some(kb), Some(dir)) = (&config.knowledge_base, path.parent()) {
            if kb.is_relative() {
                config.knowledge_base = Some(dir.join(kb));
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Loads the file named by `source` (or defaults) and applies flag overrides
    pub fn resolve(source: &Source) -> CliResult<Self> {
        let mut config = match &source.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(kb) = &source.kb {
            config.knowledge_base = Some(kb.clone());
        }
        if let Some(level) = &source.log_level {
            config.log_level = level.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> CliResult<()> {
        if !(0.0..=100.0).contains(&self.diagnosis_threshold) {
            return Err(CliError::config_error(format!(
                "diagnosis_threshold must be within [0, 100], got {}",
                self.diagnosis_threshold
            )));
        }

        if self.initial_batch == 0 {
            return Err(CliError::config_error("initial_batch must be > 0"));
        }

        if self.batch_size == 0 {
            return Err(CliError::config_error("batch_size must be > 0"));
        }

        self.severity()?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            CliError::config_error(format!("Invalid log_level: '{}'", self.log_level))
        })
    }

    /// Knowledge base path, required by every command
    pub fn knowledge_path(&self) -> CliResult<&Path> {
        self.knowledge_base.as_deref().ok_or_else(|| {
            CliError::config_error("No knowledge base given. Use --kb or set knowledge_base.")
        })
    }

    /// Queue sizes for interviews
    pub fn interview(&self) -> InterviewConfig {
        InterviewConfig {
            initial_batch: self.initial_batch,
            batch_size: self.batch_size,
        }
    }
}
