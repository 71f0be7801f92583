#![forbid(unsafe_code)]

use crate::extract::Finding;
use tracing::info;

/// Sink for non-empty findings. Called at most once per check run.
///
/// The off-host transport lives behind this seam; the default
/// implementation just logs.
pub trait Reporter: Send + Sync {
    fn report(&self, tags: &[&str], finding: &Finding);
}

#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, tags: &[&str], finding: &Finding) {
        info!(?tags, ?finding, "compliance finding");
    }
}
