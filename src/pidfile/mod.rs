//! Pidfile locking.
//!
//! A pidfile is a text file whose only content is the decimal pid of the
//! process holding the lock. The subsystem has three parts that compose in
//! order:
//!
//! - [`LockLocation`] resolves a directory and filename into an absolute path.
//! - The recycler ([`acquire`], [`is_running`], [`clear_stale`]) inspects an
//!   existing file and either refuses (live holder) or removes it (stale).
//! - [`Pidfile`] is the held lock; it is released explicitly or on drop.
//!
//! # Staleness
//!
//! A pidfile is stale when its pid is not a live process or its content is
//! not a pid at all. Stale files carry no authority and are replaced by the
//! next acquirer. A holder killed without running destructors leaves such a
//! file behind; the next acquisition repairs it.
//!
//! # Races
//!
//! New pidfiles are created with `create_new`, so two acquirers cannot both
//! create the file. Removing a stale file and creating the replacement are
//! still two steps: this is an advisory, single-host lock.

mod holder;
mod locator;
mod probe;
mod recycler;


// Re-export public API
pub use holder::Pidfile;
pub use locator::LockLocation;
pub use probe::{ProcessProbe, SystemProbe};
pub use recycler::{ClearOutcome, acquire, clear_stale, is_running, pidfile_exists, read_pid};

use crate::config;
use std::path::Path;

/// Whether `path` holds the pid of a live process, using the OS probe.
pub fn running(path: &Path) -> bool {
    is_running(path, &SystemProbe)
}

/// [`running`] for the pidfile named by the process-wide defaults.
///
/// False when the defaults do not resolve to a path.
pub fn running_default() -> bool {
    default_pidpath().is_some_and(|path| running(&path))
}

/// [`pidfile_exists`] for the pidfile named by the process-wide defaults.
pub fn pidfile_exists_default() -> bool {
    default_pidpath().is_some_and(|path| pidfile_exists(&path))
}

fn default_pidpath() -> Option<std::path::PathBuf> {
    LockLocation::from_config(&config::defaults())
        .map(|location| location.pidpath().to_path_buf())
        .ok()
}
