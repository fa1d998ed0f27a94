//! Exit code constants for the pidgate CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, bad config, child command could not run)
//! - 3: Filesystem failure
//! - 4: Lock is held by a live process

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or an unusable command.
pub const USER_ERROR: i32 = 1;

/// Filesystem failure: the pidfile could not be read, written, or removed.
pub const IO_FAILURE: i32 = 3;

/// Lock acquisition failure: another live process holds the pidfile.
pub const LOCK_FAILURE: i32 = 4;
