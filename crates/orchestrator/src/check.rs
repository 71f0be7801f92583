#![forbid(unsafe_code)]

use crate::engine::Services;
use crate::error::Error;
use crate::extract::extract_attributes;
use crate::matcher::matching_processes;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Cache key for the process-table snapshot. One key for every check:
/// all evaluations within a cycle amortize a single enumeration.
pub const SNAPSHOT_KEY: &str = "process.table";

/// Tag identifying the rule category on every reported finding.
pub const CHECK_KIND_TAG: &str = "check_kind:process";

/// Snapshot cache shared by all process checks.
pub type SnapshotCache = kernel::TtlCache<String, Arc<kernel::ProcessSnapshot>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// A non-empty finding was handed to the reporter.
    Reported,
    /// Nothing to report: name absent or ambiguous, or no rule matched.
    Skipped,
}

/// One process compliance check, evaluating a single [`config::ProcessSpec`].
#[derive(Debug, Clone)]
pub struct ProcessCheck {
    spec: config::ProcessSpec,
}

impl ProcessCheck {
    pub fn new(spec: config::ProcessSpec) -> Self {
        Self { spec }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Evaluates the check against the current process table.
    ///
    /// The snapshot is resolved through the cache; within `snapshot_ttl`
    /// repeated runs reuse one process-table view and produce the same
    /// finding. The only fatal outcome is a provider failure on a cache
    /// miss; every other non-finding is a silent skip.
    pub fn run(&self, services: &Services, snapshot_ttl: Duration) -> Result<CheckStatus, Error> {
        let snapshot = services.cache.get_or_fetch(SNAPSHOT_KEY.to_owned(), snapshot_ttl, || {
            services.provider.fetch().map(Arc::new)
        })?;

        let matches = matching_processes(&snapshot, &self.spec.name);
        let [process] = matches.as_slice() else {
            debug!(
                name = %self.spec.name,
                count = matches.len(),
                "not exactly one process matched; skipping"
            );
            return Ok(CheckStatus::Skipped);
        };

        let finding = extract_attributes(&process.cmdline, &self.spec.report);
        if finding.is_empty() {
            debug!(name = %self.spec.name, "no attributes extracted; skipping");
            return Ok(CheckStatus::Skipped);
        }

        services.reporter.report(&[CHECK_KIND_TAG], &finding);
        Ok(CheckStatus::Reported)
    }
}
