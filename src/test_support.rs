use crate::pidfile::ProcessProbe;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Scripted process table.
///
/// Clones share the table, so a test can keep one handle and "kill" pids
/// while a `Pidfile` owns another.
#[derive(Debug, Clone)]
pub(crate) struct FakeProbe {
    current: u32,
    live: Arc<Mutex<HashSet<u32>>>,
}

impl FakeProbe {
    /// A table where only `current` is running.
    pub(crate) fn new(current: u32) -> Self {
        Self {
            current,
            live: Arc::new(Mutex::new(HashSet::from([current]))),
        }
    }

    /// Same table, seen from a different process.
    pub(crate) fn as_process(&self, current: u32) -> Self {
        self.spawn(current);
        Self {
            current,
            live: Arc::clone(&self.live),
        }
    }

    pub(crate) fn spawn(&self, pid: u32) {
        self.table().insert(pid);
    }

    pub(crate) fn kill(&self, pid: u32) {
        self.table().remove(&pid);
    }

    fn table(&self) -> std::sync::MutexGuard<'_, HashSet<u32>> {
        self.live.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

impl ProcessProbe for FakeProbe {
    fn is_alive(&self, pid: u32) -> bool {
        self.table().contains(&pid)
    }

    fn current_pid(&self) -> u32 {
        self.current
    }
}

pub(crate) fn create_pid_dir() -> TempDir {
    TempDir::new().unwrap()
}

pub(crate) fn write_pidfile(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
