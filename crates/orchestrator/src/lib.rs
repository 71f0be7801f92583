#![forbid(unsafe_code)]

pub mod check;
pub mod clock;
mod engine;
mod error;
pub mod extract;
pub mod matcher;
pub mod report;

pub use check::{CHECK_KIND_TAG, CheckStatus, ProcessCheck, SNAPSHOT_KEY, SnapshotCache};
pub use clock::{Clock, SystemClock};
pub use engine::{CheckEngine, ControlEvent, ReloadBundle, Services, TickReport};
pub use error::Error;
pub use extract::{Finding, extract_attributes};
pub use matcher::matching_processes;
pub use report::{LogReporter, Reporter};
