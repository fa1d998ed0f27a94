//! Process-scope default configuration.
//!
//! Only the boundary layer (the CLI and the `Pidfile::acquire_defaults`
//! convenience) reads this; the locator itself always receives an explicit
//! `PidfileConfig`.

use super::model::PidfileConfig;
use std::sync::{LazyLock, RwLock};

static DEFAULTS: LazyLock<RwLock<PidfileConfig>> =
    LazyLock::new(|| RwLock::new(PidfileConfig::default()));

/// Snapshot of the current process-wide defaults.
pub fn defaults() -> PidfileConfig {
    DEFAULTS
        .read()
        .unwrap_or_else(|poison| poison.into_inner())
        .clone()
}

/// Replace the process-wide defaults. Affects later constructions only.
pub fn set_defaults(config: PidfileConfig) {
    let mut guard = DEFAULTS.write().unwrap_or_else(|poison| poison.into_inner());
    *guard = config;
}

/// Restore the built-in defaults.
pub fn reset_defaults() {
    set_defaults(PidfileConfig::default());
}
