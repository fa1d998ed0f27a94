//! The acquired-lock handle.

use super::locator::LockLocation;
use super::probe::{ProcessProbe, SystemProbe};
use super::recycler;
use crate::config::{self, PidfileConfig};
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{debug, warn};

/// A held pidfile.
///
/// Only a successful acquisition produces a `Pidfile`. The file is removed
/// by [`Pidfile::release`] or, failing that, when the handle is dropped.
/// A released handle stays queryable but cannot be used to lock again.
#[derive(Debug)]
pub struct Pidfile<P: ProcessProbe = SystemProbe> {
    location: LockLocation,

    /// Pid written at acquisition; `None` once released.
    pid: Option<u32>,

    locktime: DateTime<Utc>,

    probe: P,
}

impl Pidfile<SystemProbe> {
    /// Acquire the pidfile described by `config`.
    pub fn acquire(config: &PidfileConfig) -> Result<Self> {
        Self::acquire_with(LockLocation::from_config(config)?, SystemProbe)
    }

    /// Acquire with per-call overrides of the directory and/or filename.
    pub fn acquire_at(
        config: &PidfileConfig,
        piddir: Option<&Path>,
        pidfile: Option<&str>,
    ) -> Result<Self> {
        Self::acquire_with(LockLocation::resolve(config, piddir, pidfile)?, SystemProbe)
    }

    /// Acquire using the process-wide defaults from [`config::defaults`].
    pub fn acquire_defaults() -> Result<Self> {
        Self::acquire(&config::defaults())
    }
}

impl<P: ProcessProbe> Pidfile<P> {
    /// Acquire `location` using an explicit process probe.
    ///
    /// # Returns
    ///
    /// * `Ok(Pidfile)` - The file now records our pid
    /// * `Err(PidfileError::LockHeld)` - Another live process holds it
    /// * `Err(PidfileError::Io)` - Filesystem failure
    pub fn acquire_with(location: LockLocation, probe: P) -> Result<Self> {
        let pid = recycler::acquire(location.pidpath(), &probe)?;

        Ok(Self {
            location,
            pid: Some(pid),
            locktime: Utc::now(),
            probe,
        })
    }

    /// Remove the pidfile and forget our pid.
    ///
    /// Calling this again after a successful release does nothing. If the
    /// file cannot be removed the handle stays held and the error is
    /// returned.
    pub fn release(&mut self) -> Result<()> {
        if self.pid.is_none() {
            return Ok(());
        }

        recycler::remove_if_present(self.location.pidpath())?;
        let pid = self.pid.take();
        debug!(path = %self.location, pid = ?pid, "released pidfile");

        Ok(())
    }

    /// Whether a file currently exists at our path, whatever it contains.
    pub fn pidfile_exists(&self) -> bool {
        recycler::pidfile_exists(self.location.pidpath())
    }

    /// Whether we still hold a valid, live lock.
    ///
    /// False after release, and false if the file on disk no longer records
    /// our pid.
    pub fn is_alive(&self) -> bool {
        let Some(pid) = self.pid else {
            return false;
        };

        matches!(
            recycler::inspect(self.location.pidpath(), &self.probe),
            Ok(recycler::Existing::Live(recorded)) if recorded == pid
        )
    }

    /// Whether [`Pidfile::release`] has completed.
    pub fn is_released(&self) -> bool {
        self.pid.is_none()
    }

    /// Pid recorded at acquisition, or `None` once released.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// When the lock was acquired.
    pub fn locktime(&self) -> DateTime<Utc> {
        self.locktime
    }

    /// Pidfile name.
    pub fn pidfile(&self) -> &str {
        self.location.pidfile()
    }

    /// Absolute directory containing the pidfile.
    pub fn piddir(&self) -> &Path {
        self.location.piddir()
    }

    /// Absolute path of the pidfile.
    pub fn pidpath(&self) -> &Path {
        self.location.pidpath()
    }

    /// The resolved location.
    pub fn location(&self) -> &LockLocation {
        &self.location
    }
}

impl<P: ProcessProbe> Drop for Pidfile<P> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!(path = %self.location, error = %e, "failed to release pidfile on drop");
        }
    }
}
