//! pidgate: pidfile-based single-instance locking.
//!
//! ```no_run
//! use pidgate::config::PidfileConfig;
//! use pidgate::pidfile::Pidfile;
//!
//! let config = PidfileConfig::new("/var/run/myd", "myd.pid");
//! let mut lock = Pidfile::acquire(&config)?;
//! // ... run as the single instance ...
//! lock.release()?;
//! # Ok::<(), pidgate::error::PidfileError>(())
//! ```

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod pidfile;

#[cfg(test)]
pub(crate) mod test_support;
