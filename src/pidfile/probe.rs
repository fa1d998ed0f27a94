//! Process liveness probing.
//!
//! The probe answers two questions for the rest of the crate: "does a
//! process with this pid exist" and "what is my own pid". Tests substitute a
//! scripted implementation; production code uses [`SystemProbe`].

/// Source of process identity and liveness.
pub trait ProcessProbe {
    /// Whether a process with `pid` currently exists.
    ///
    /// Must not disturb the target process.
    fn is_alive(&self, pid: u32) -> bool;

    /// The identifier of the calling process.
    fn current_pid(&self) -> u32 {
        std::process::id()
    }
}

/// Probe backed by the operating system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemProbe;

impl ProcessProbe for SystemProbe {
    fn is_alive(&self, pid: u32) -> bool {
        process_exists(pid)
    }
}

/// Null-signal existence check.
///
/// Pid 0 and values outside `pid_t` are rejected up front: `kill(0, 0)`
/// addresses the caller's process group and would always succeed.
#[cfg(unix)]
fn process_exists(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal;
    use nix::unistd::Pid;

    let raw = match i32::try_from(pid) {
        Ok(raw) if raw > 0 => raw,
        _ => return false,
    };

    match signal::kill(Pid::from_raw(raw), None) {
        Ok(()) => true,
        // Exists, but belongs to someone we may not signal.
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

/// Without a null signal we cannot tell, so never report a holder as dead.
#[cfg(not(unix))]
fn process_exists(pid: u32) -> bool {
    pid != 0
}
