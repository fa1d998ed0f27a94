//! PidfileConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where pidfiles live when a caller does not say otherwise.
///
/// Unknown fields in a YAML config are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PidfileConfig {
    /// Directory holding the pidfile (default: `/var/run`).
    #[serde(default = "default_piddir")]
    pub piddir: PathBuf,

    /// Pidfile name (default: `<executable stem>.pid`).
    #[serde(default = "default_pidfile")]
    pub pidfile: String,
}

impl Default for PidfileConfig {
    fn default() -> Self {
        Self {
            piddir: default_piddir(),
            pidfile: default_pidfile(),
        }
    }
}

impl PidfileConfig {
    /// Build a config for an explicit directory and filename.
    pub fn new(piddir: impl Into<PathBuf>, pidfile: impl Into<String>) -> Self {
        Self {
            piddir: piddir.into(),
            pidfile: pidfile.into(),
        }
    }

    /// Same config with a different directory.
    pub fn with_piddir(mut self, piddir: impl Into<PathBuf>) -> Self {
        self.piddir = piddir.into();
        self
    }

    /// Same config with a different filename.
    pub fn with_pidfile(mut self, pidfile: impl Into<String>) -> Self {
        self.pidfile = pidfile.into();
        self
    }
}
