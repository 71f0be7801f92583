mod cache;
mod error;
mod provider;
mod snapshot;

pub use cache::TtlCache;
pub use error::Error;
pub use provider::{ProcfsProvider, SnapshotProvider};
pub use snapshot::{ProcessInfo, ProcessSnapshot};
