use crate::signals::SignalEvent;
use flume::SendError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to install signal handler: {0}")]
    SignalHandler(#[source] io::Error),

    #[error("failed to forward signal event: {0}")]
    ForwardSignal(#[from] SendError<SignalEvent>),
}
