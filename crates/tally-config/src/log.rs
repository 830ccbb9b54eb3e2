//! Logging configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LogConfig {
    /// `tracing` filter directive (e.g., `"info"`, `"tally_cli=debug,info"`).
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Write events to this file instead of stderr.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            path: None,
        }
    }
}
