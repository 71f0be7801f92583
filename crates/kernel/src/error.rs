#![forbid(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to enumerate processes: {0}")]
    Procfs(#[from] procfs::ProcError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
