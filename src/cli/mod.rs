//! CLI argument parsing for pidgate.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Pidgate: run at most one instance of a command per pidfile.
///
/// A pidfile records the pid of the process holding the lock. Pidfiles left
/// behind by dead processes are detected and recycled automatically.
#[derive(Parser, Debug)]
#[command(name = "pidgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for pidgate.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Hold the pidfile while running a command.
    ///
    /// Fails with exit code 4 if a live process already holds the pidfile.
    /// The pidfile is removed when the command exits. SIGINT and SIGTERM are
    /// forwarded to the command; pidgate then exits with 128 + the signal.
    Run(RunArgs),

    /// Report whether the pidfile is held by a live process.
    Status(StatusArgs),

    /// Print the pid recorded in the pidfile.
    Pid(LockArgs),

    /// Remove a stale pidfile.
    ///
    /// Refuses to remove a pidfile whose process is still running.
    Clear(LockArgs),
}

/// Options shared by every command for locating the pidfile.
#[derive(Args, Debug, Clone, Default)]
pub struct LockArgs {
    /// YAML config file providing `piddir` and `pidfile` defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory containing the pidfile.
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Pidfile name.
    #[arg(short, long, value_name = "NAME")]
    pub file: Option<String>,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub lock: LockArgs,

    /// Command to run while holding the pidfile.
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Arguments for the `status` command.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub lock: LockArgs,

    /// Print status as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
