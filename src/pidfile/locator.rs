//! Resolution of a pid directory and filename into a lock path.

use crate::config::{PidfileConfig, validate_pidfile_name};
use crate::error::{PidfileError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// The resolved location of a pidfile.
///
/// All three parts are fixed at resolution time; `pidpath` is always
/// `piddir.join(pidfile)` with an absolute `piddir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockLocation {
    piddir: PathBuf,
    pidfile: String,
    pidpath: PathBuf,
}

impl LockLocation {
    /// Resolve a lock location.
    ///
    /// Omitted arguments fall back to `config`. A relative directory is made
    /// absolute against the current working directory; nothing on disk is
    /// touched.
    ///
    /// # Returns
    ///
    /// * `Ok(LockLocation)` - Resolved location
    /// * `Err(PidfileError::Config)` - Empty directory or an invalid filename
    pub fn resolve(
        config: &PidfileConfig,
        piddir: Option<&Path>,
        pidfile: Option<&str>,
    ) -> Result<Self> {
        let piddir = piddir.unwrap_or(config.piddir.as_path());
        let pidfile = pidfile.unwrap_or(config.pidfile.as_str());

        if piddir.as_os_str().is_empty() {
            return Err(PidfileError::Config(
                "pid directory must not be empty".to_string(),
            ));
        }
        validate_pidfile_name(pidfile)?;

        let piddir = std::path::absolute(piddir)
            .map_err(|e| PidfileError::io(piddir, "resolve pid directory", e))?;
        let pidpath = piddir.join(pidfile);

        Ok(Self {
            piddir,
            pidfile: pidfile.to_string(),
            pidpath,
        })
    }

    /// Resolve using only the values in `config`.
    pub fn from_config(config: &PidfileConfig) -> Result<Self> {
        Self::resolve(config, None, None)
    }

    /// Absolute directory containing the pidfile.
    pub fn piddir(&self) -> &Path {
        &self.piddir
    }

    /// Pidfile name.
    pub fn pidfile(&self) -> &str {
        &self.pidfile
    }

    /// Absolute path of the pidfile.
    pub fn pidpath(&self) -> &Path {
        &self.pidpath
    }
}

impl fmt::Display for LockLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pidpath.display())
    }
}
