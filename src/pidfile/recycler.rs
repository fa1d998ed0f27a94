//! Pidfile acquisition, stale lock recycling, and path-level queries.

use super::probe::ProcessProbe;
use crate::error::{PidfileError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, info};

/// What a pidfile on disk currently says about the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Existing {
    /// No file at the path: the lock is free.
    Absent,
    /// The recorded pid belongs to a live process.
    Live(u32),
    /// The file carries no authority. `None` when it could not be parsed.
    Stale(Option<u32>),
}

/// Result of [`clear_stale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// There was no pidfile to clear.
    NotPresent,
    /// A stale pidfile was removed; the pid it recorded, if readable.
    Removed { recorded_pid: Option<u32> },
}

/// Whether a pidfile entry currently exists at `path`, regardless of its
/// content.
///
/// A symlink counts even when its target is missing; a directory does not.
pub fn pidfile_exists(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|metadata| !metadata.is_dir())
        .unwrap_or(false)
}

/// Read the pid recorded at `path`.
///
/// Surrounding whitespace is ignored.
///
/// # Returns
///
/// * `Ok(u32)` - The recorded pid
/// * `Err(PidfileError::Io)` - The file is absent or unreadable
/// * `Err(PidfileError::MalformedPid)` - The content is not a pid
pub fn read_pid(path: &Path) -> Result<u32> {
    let bytes = fs::read(path).map_err(|e| PidfileError::io(path, "read pidfile", e))?;
    let content = String::from_utf8_lossy(&bytes);

    parse_pid(&content).ok_or_else(|| PidfileError::MalformedPid {
        path: path.to_path_buf(),
        content: content.into_owned(),
    })
}

/// Whether `path` holds the pid of a live process.
///
/// Never fails: an absent, unreadable, or malformed file is simply not running.
pub fn is_running<P: ProcessProbe + ?Sized>(path: &Path, probe: &P) -> bool {
    match inspect(path, probe) {
        Ok(Existing::Live(_)) => true,
        Ok(_) => false,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "treating unreadable pidfile as not running");
            false
        }
    }
}

/// Acquire the pidfile at `path` for the process reported by `probe`.
///
/// A live holder refuses the acquisition and leaves the file untouched. A
/// stale file (dead or unparsable pid) is removed first. The new file is
/// created exclusively, so an acquirer that loses the race between the
/// staleness check and the create fails instead of overwriting the winner.
/// The window between removing a stale file and creating the new one
/// remains: two acquirers that both judged the same file stale can still
/// delete each other's work.
///
/// # Returns
///
/// * `Ok(u32)` - The pid written to the file
/// * `Err(PidfileError::LockHeld)` - A live process holds the lock
/// * `Err(PidfileError::Io)` - Filesystem failure
pub fn acquire<P: ProcessProbe + ?Sized>(path: &Path, probe: &P) -> Result<u32> {
    match inspect(path, probe)? {
        Existing::Live(pid) => {
            return Err(PidfileError::LockHeld {
                path: path.to_path_buf(),
                pid: Some(pid),
            });
        }
        Existing::Stale(recorded) => {
            info!(
                path = %path.display(),
                recorded_pid = ?recorded,
                "recycling stale pidfile"
            );
            remove_if_present(path)?;
        }
        Existing::Absent => {}
    }

    let pid = probe.current_pid();
    write_pidfile(path, pid, probe)?;
    debug!(path = %path.display(), pid, "acquired pidfile");

    Ok(pid)
}

/// Remove the pidfile at `path` if it is stale.
///
/// Used by operators to clean up after a crashed holder without acquiring.
///
/// # Returns
///
/// * `Ok(ClearOutcome)` - Nothing to clear, or the stale file was removed
/// * `Err(PidfileError::LockHeld)` - The recorded pid is alive; file untouched
pub fn clear_stale<P: ProcessProbe + ?Sized>(path: &Path, probe: &P) -> Result<ClearOutcome> {
    match inspect(path, probe)? {
        Existing::Absent => Ok(ClearOutcome::NotPresent),
        Existing::Live(pid) => Err(PidfileError::LockHeld {
            path: path.to_path_buf(),
            pid: Some(pid),
        }),
        Existing::Stale(recorded_pid) => {
            remove_if_present(path)?;
            info!(path = %path.display(), recorded_pid = ?recorded_pid, "cleared stale pidfile");
            Ok(ClearOutcome::Removed { recorded_pid })
        }
    }
}

/// Classify the pidfile at `path`.
///
/// An entry whose content cannot be found (a dangling symlink, or a file
/// deleted between the two lookups) is stale: it blocks `create_new` but
/// names no process.
pub(crate) fn inspect<P: ProcessProbe + ?Sized>(path: &Path, probe: &P) -> Result<Existing> {
    match fs::symlink_metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Existing::Absent),
        Err(e) => return Err(PidfileError::io(path, "stat pidfile", e)),
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Existing::Stale(None)),
        Err(e) => return Err(PidfileError::io(path, "read pidfile", e)),
    };

    let state = match parse_pid(&String::from_utf8_lossy(&bytes)) {
        Some(pid) if probe.is_alive(pid) => Existing::Live(pid),
        Some(pid) => Existing::Stale(Some(pid)),
        None => Existing::Stale(None),
    };

    Ok(state)
}

/// Delete `path`, tolerating a concurrent delete.
pub(crate) fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PidfileError::io(path, "remove pidfile", e)),
    }
}

fn parse_pid(content: &str) -> Option<u32> {
    content.trim().parse().ok()
}

/// Create `path` exclusively and record `pid` in it.
fn write_pidfile<P: ProcessProbe + ?Sized>(path: &Path, pid: u32, probe: &P) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                let holder = match inspect(path, probe) {
                    Ok(Existing::Live(holder_pid)) => Some(holder_pid),
                    _ => None,
                };
                PidfileError::LockHeld {
                    path: path.to_path_buf(),
                    pid: holder,
                }
            } else {
                PidfileError::io(path, "create pidfile", e)
            }
        })?;

    file.write_all(pid.to_string().as_bytes()).map_err(|e| {
        let _ = fs::remove_file(path);
        PidfileError::io(path, "write pidfile", e)
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        PidfileError::io(path, "sync pidfile", e)
    })?;

    Ok(())
}
