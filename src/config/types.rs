//! Default values used by the PidfileConfig struct.

use std::path::PathBuf;

/// Directory used when nothing else is configured.
pub const DEFAULT_PIDDIR: &str = "/var/run";

/// Filename stem used when the executable name cannot be determined.
pub const FALLBACK_PID_STEM: &str = "pidgate";

/// Extension appended to the executable stem.
pub const PID_EXTENSION: &str = "pid";

pub(crate) fn default_piddir() -> PathBuf {
    PathBuf::from(DEFAULT_PIDDIR)
}

/// `<executable stem>.pid`, e.g. `mydaemon.pid` for `/usr/sbin/mydaemon`.
pub(crate) fn default_pidfile() -> String {
    let stem = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_PID_STEM.to_string());

    format!("{}.{}", stem, PID_EXTENSION)
}
