//! Command implementations for pidgate.
//!
//! This is the boundary layer: it loads configuration, installs it as the
//! process-wide default, and drives the pidfile library.

use crate::cli::{Command, LockArgs, RunArgs, StatusArgs};
use crate::shutdown::Shutdown;
use pidgate::config::{self, PidfileConfig};
use pidgate::error::{PidfileError, Result};
use pidgate::exit_codes;
use pidgate::pidfile::{self, ClearOutcome, LockLocation, Pidfile};
use serde::Serialize;
use std::process::{Child, Command as Process, ExitStatus};
use std::time::Duration;
use tracing::{debug, info, warn};

/// How often `run` checks whether its command has exited.
const CHILD_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Dispatch a command to its implementation.
///
/// Returns the exit code on success; `run` forwards the child's code.
pub fn dispatch(command: Command) -> Result<i32> {
    match command {
        Command::Run(args) => cmd_run(args, &Shutdown::install()?),
        Command::Status(args) => cmd_status(args),
        Command::Pid(args) => cmd_pid(args),
        Command::Clear(args) => cmd_clear(args),
    }
}

/// Load the config file (if any) into the process-wide defaults, then apply
/// the per-call overrides.
fn resolve_location(args: &LockArgs) -> Result<LockLocation> {
    if let Some(path) = &args.config {
        config::set_defaults(PidfileConfig::load(path)?);
    }

    LockLocation::resolve(
        &config::defaults(),
        args.dir.as_deref(),
        args.file.as_deref(),
    )
}

fn cmd_run(args: RunArgs, shutdown: &Shutdown) -> Result<i32> {
    let location = resolve_location(&args.lock)?;
    let mut lock = Pidfile::acquire_with(location, pidfile::SystemProbe)?;

    let (program, rest) = args
        .command
        .split_first()
        .ok_or_else(|| PidfileError::Child("no command given".to_string()))?;

    debug!(program = %program, pidfile = %lock.location(), "running under pidfile");

    // `lock` is released on every path out of this function.
    let mut child = Process::new(program)
        .args(rest)
        .spawn()
        .map_err(|e| PidfileError::Child(format!("failed to run '{}': {}", program, e)))?;

    let code = supervise(&mut child, shutdown)?;

    lock.release()?;
    Ok(code)
}

/// Wait for `child`, passing termination signals on to it.
///
/// The first signal is forwarded and the exit code becomes `128 + signo`.
/// A second signal kills the child outright.
fn supervise(child: &mut Child, shutdown: &Shutdown) -> Result<i32> {
    let mut forwarded = None;

    loop {
        let status = child
            .try_wait()
            .map_err(|e| PidfileError::Child(format!("failed to wait for command: {}", e)))?;
        if let Some(status) = status {
            return Ok(match forwarded {
                Some(signo) => 128 + signo,
                None => exit_code_of(status),
            });
        }

        let Some(signo) = shutdown.next(CHILD_POLL_INTERVAL) else {
            continue;
        };

        if forwarded.is_none() {
            info!(signal = signo, child = child.id(), "forwarding signal to command");
            forward_signal(child, signo);
            forwarded = Some(signo);
        } else {
            warn!(child = child.id(), "second signal received, killing command");
            if let Err(e) = child.kill() {
                debug!(error = %e, "command already exited");
            }
        }
    }
}

#[cfg(unix)]
fn forward_signal(child: &mut Child, signo: i32) {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let result = Signal::try_from(signo)
        .map_err(|e| e.to_string())
        .and_then(|signal| {
            kill(Pid::from_raw(child.id() as i32), signal).map_err(|e| e.to_string())
        });
    if let Err(e) = result {
        warn!(signal = signo, error = %e, "failed to forward signal, killing command");
        let _ = child.kill();
    }
}

#[cfg(not(unix))]
fn forward_signal(child: &mut Child, _signo: i32) {
    let _ = child.kill();
}

/// The child's exit code, or `USER_ERROR` when it was killed by a signal.
fn exit_code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(exit_codes::USER_ERROR)
}

/// Machine-readable status report.
#[derive(Debug, Serialize)]
struct StatusReport {
    pidpath: String,
    exists: bool,
    running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pid: Option<u32>,
}

fn cmd_status(args: StatusArgs) -> Result<i32> {
    let location = resolve_location(&args.lock)?;
    let path = location.pidpath();

    let exists = pidfile::pidfile_exists(path);
    let report = StatusReport {
        pidpath: path.display().to_string(),
        exists,
        running: pidfile::running(path),
        pid: if exists { pidfile::read_pid(path).ok() } else { None },
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| PidfileError::Config(format!("failed to serialize status: {}", e)))?;
        println!("{}", json);
    } else if report.running {
        // `running` implies a readable pid.
        let pid = report.pid.unwrap_or_default();
        println!("running (pid {}): {}", pid, report.pidpath);
    } else if report.exists {
        println!("stale: {}", report.pidpath);
    } else {
        println!("not running: {}", report.pidpath);
    }

    Ok(exit_codes::SUCCESS)
}

fn cmd_pid(args: LockArgs) -> Result<i32> {
    let location = resolve_location(&args)?;
    let pid = pidfile::read_pid(location.pidpath())?;

    println!("{}", pid);
    Ok(exit_codes::SUCCESS)
}

fn cmd_clear(args: LockArgs) -> Result<i32> {
    let location = resolve_location(&args)?;

    match pidfile::clear_stale(location.pidpath(), &pidfile::SystemProbe)? {
        ClearOutcome::NotPresent => println!("No pidfile at {}.", location),
        ClearOutcome::Removed {
            recorded_pid: Some(pid),
        } => println!("Removed stale pidfile {} (pid {} is not running).", location, pid),
        ClearOutcome::Removed { recorded_pid: None } => {
            println!("Removed malformed pidfile {}.", location)
        }
    }

    Ok(exit_codes::SUCCESS)
}
