#![forbid(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("snapshot error: {0}")]
    Snapshot(#[from] kernel::Error),
}
