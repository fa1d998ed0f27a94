//! SIGINT/SIGTERM delivery for commands that hold a pidfile.
//!
//! The signals are blocked on the calling thread and collected by a
//! dedicated thread with `sigwait`, so the command loop sees them as plain
//! channel messages and can release its pidfile before exiting. Threads and
//! children spawned afterwards inherit the mask; `std::process::Command`
//! clears it again in the child before `exec`.

use pidgate::error::Result;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

/// Termination signals received by the process, as raw signal numbers.
pub struct Shutdown {
    tx: Sender<i32>,
    rx: Receiver<i32>,
}

impl Shutdown {
    /// A receiver that only sees signals sent through [`Shutdown::notify`].
    pub fn inert() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Start collecting SIGINT and SIGTERM.
    ///
    /// Must run before any other thread is spawned so that no thread is
    /// left with the default (terminating) disposition.
    #[cfg(unix)]
    pub fn install() -> Result<Self> {
        use nix::sys::signal::{SigSet, Signal};
        use pidgate::error::PidfileError;
        use tracing::debug;

        let shutdown = Self::inert();

        let mut mask = SigSet::empty();
        mask.add(Signal::SIGINT);
        mask.add(Signal::SIGTERM);
        mask.thread_block()
            .map_err(|e| PidfileError::Child(format!("failed to block signals: {}", e)))?;

        let tx = shutdown.tx.clone();
        std::thread::Builder::new()
            .name("pidgate-signals".to_string())
            .spawn(move || {
                while let Ok(signal) = mask.wait() {
                    debug!(signal = ?signal, "received termination signal");
                    if tx.send(signal as i32).is_err() {
                        break;
                    }
                }
            })
            .map_err(|e| PidfileError::Child(format!("failed to start signal thread: {}", e)))?;

        Ok(shutdown)
    }

    #[cfg(not(unix))]
    pub fn install() -> Result<Self> {
        Ok(Self::inert())
    }

    /// Queue `signo` as if the process had received it.
    #[cfg(test)]
    pub fn notify(&self, signo: i32) {
        let _ = self.tx.send(signo);
    }

    /// The next received signal, waiting at most `timeout`.
    pub fn next(&self, timeout: Duration) -> Option<i32> {
        self.rx.recv_timeout(timeout).ok()
    }
}
