#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::time::Duration;

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Engine {
    /// Seconds between evaluation passes.
    #[serde_as(as = "serde_with::DurationSeconds")]
    pub cycle: Duration,

    /// Validity window of the cached process-table snapshot.
    ///
    /// All checks evaluated within this window share one enumeration.
    #[serde_as(as = "serde_with::DurationSeconds")]
    pub snapshot_ttl: Duration,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            cycle: Duration::from_secs(60),
            snapshot_ttl: Duration::from_secs(30),
        }
    }
}
