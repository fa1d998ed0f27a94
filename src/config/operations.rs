//! Config loading, validation, and utility operations.

use super::model::PidfileConfig;
use crate::error::{PidfileError, Result};
use std::path::Path;

impl PidfileConfig {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(PidfileConfig)` - Successfully loaded and validated config
    /// * `Err(PidfileError::Config)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PidfileError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PidfileConfig = serde_yaml::from_str(yaml)
            .map_err(|e| PidfileError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| PidfileError::Config(format!("failed to serialize config: {}", e)))
    }

    /// Validate config values.
    ///
    /// - `piddir` must be non-empty
    /// - `pidfile` must be a bare, non-empty file name
    pub fn validate(&self) -> Result<()> {
        if self.piddir.as_os_str().is_empty() {
            return Err(PidfileError::Config(
                "config validation failed: piddir must not be empty".to_string(),
            ));
        }

        validate_pidfile_name(&self.pidfile)
    }
}

/// Check that `name` names a file directly inside the pid directory.
pub(crate) fn validate_pidfile_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PidfileError::Config(
            "config validation failed: pidfile must not be empty".to_string(),
        ));
    }

    if name == "." || name == ".." || name.contains('/') || name.contains(std::path::MAIN_SEPARATOR)
    {
        return Err(PidfileError::Config(format!(
            "config validation failed: pidfile must be a file name, not a path (found '{}')",
            name
        )));
    }

    Ok(())
}
