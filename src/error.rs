//! Error types for pidgate.
//!
//! Uses thiserror for derive macros. Filesystem errors keep the original
//! `std::io::Error` as their source so callers can inspect the kind.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pidfile operations.
#[derive(Error, Debug)]
pub enum PidfileError {
    /// A live process already holds the pidfile.
    ///
    /// `pid` is `None` when another acquirer created the file between our
    /// staleness check and our write, before recording its pid.
    #[error("pidfile '{}' is held by {}", path.display(), describe_holder(*pid))]
    LockHeld { path: PathBuf, pid: Option<u32> },

    /// The pidfile exists but does not contain a process id.
    #[error("pidfile '{}' does not contain a valid pid (found {content:?})", path.display())]
    MalformedPid { path: PathBuf, content: String },

    /// A filesystem operation on the pidfile failed.
    #[error("failed to {operation} '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or is invalid.
    #[error("{0}")]
    Config(String),

    /// The command run under the lock could not be started or awaited.
    #[error("command failed: {0}")]
    Child(String),
}

impl PidfileError {
    /// Wrap an I/O error with the path and operation that produced it.
    pub(crate) fn io(
        path: impl Into<PathBuf>,
        operation: &'static str,
        source: std::io::Error,
    ) -> Self {
        PidfileError::Io {
            path: path.into(),
            operation,
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PidfileError::LockHeld { .. } => exit_codes::LOCK_FAILURE,
            PidfileError::MalformedPid { .. } => exit_codes::USER_ERROR,
            PidfileError::Io { .. } => exit_codes::IO_FAILURE,
            PidfileError::Config(_) => exit_codes::USER_ERROR,
            PidfileError::Child(_) => exit_codes::USER_ERROR,
        }
    }
}

fn describe_holder(pid: Option<u32>) -> String {
    match pid {
        Some(pid) => format!("running process {}", pid),
        None => "another process".to_string(),
    }
}

/// Result type alias for pidgate operations.
pub type Result<T> = std::result::Result<T, PidfileError>;
