#![forbid(unsafe_code)]

use crate::error::Error;
use crate::snapshot::{ProcessInfo, ProcessSnapshot};
use std::collections::HashMap;
use tracing::debug;

/// Injectable source of process-table snapshots.
///
/// The production implementation reads the OS; tests substitute
/// deterministic fixtures.
pub trait SnapshotProvider: Send + Sync {
    fn fetch(&self) -> Result<ProcessSnapshot, Error>;
}

/// Snapshot provider backed by the /proc filesystem.
#[derive(Debug, Default)]
pub struct ProcfsProvider;

impl SnapshotProvider for ProcfsProvider {
    fn fetch(&self) -> Result<ProcessSnapshot, Error> {
        let mut processes = HashMap::new();

        for process in procfs::process::all_processes()? {
            // Processes racing with the walk show up as per-entry errors.
            let Ok(process) = process else {
                continue;
            };
            let pid = process.pid();
            let stat = match process.stat() {
                Ok(stat) => stat,
                Err(err) => {
                    debug!(pid, %err, "skipping unreadable process");
                    continue;
                }
            };
            // Kernel threads have an empty cmdline; keep them, the matcher
            // simply never extracts anything from them.
            let cmdline = process.cmdline().unwrap_or_default();
            processes.insert(
                pid,
                ProcessInfo {
                    name: stat.comm,
                    cmdline,
                },
            );
        }

        Ok(ProcessSnapshot::new(processes))
    }
}
