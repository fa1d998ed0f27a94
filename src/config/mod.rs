//! Configuration for pidgate.
//!
//! `PidfileConfig` carries the default pidfile directory and filename. It is
//! an explicit value handed to the locator; the process-scope copy in
//! [`defaults`] exists for the CLI boundary and for callers that want the
//! classic "set once, construct anywhere" behavior.

mod defaults;
mod model;
mod operations;
pub mod types;


// Re-export public API
pub use defaults::{defaults, reset_defaults, set_defaults};
pub use model::PidfileConfig;
pub(crate) use operations::validate_pidfile_name;
