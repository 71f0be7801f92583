#![forbid(unsafe_code)]

use libc::pid_t;
use std::collections::HashMap;

/// Point-in-time view of the OS process table.
///
/// Immutable after creation; shared read-only (behind an `Arc`) by every
/// check evaluated within the cache validity window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessSnapshot {
    processes: HashMap<pid_t, ProcessInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub name: String,
    pub cmdline: Vec<String>,
}

impl ProcessSnapshot {
    pub fn new(processes: HashMap<pid_t, ProcessInfo>) -> Self {
        Self { processes }
    }

    pub fn processes(&self) -> &HashMap<pid_t, ProcessInfo> {
        &self.processes
    }

    pub fn get(&self, pid: pid_t) -> Option<&ProcessInfo> {
        self.processes.get(&pid)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

impl FromIterator<(pid_t, ProcessInfo)> for ProcessSnapshot {
    fn from_iter<I: IntoIterator<Item = (pid_t, ProcessInfo)>>(iter: I) -> Self {
        Self {
            processes: iter.into_iter().collect(),
        }
    }
}
