use crate::error::Error;
use flume::Sender;
use tokio::signal::unix::{SignalKind, signal};

/// Indefinitely listens to signals and sends signal events to the provided channel.
pub async fn wait_for_signal(signal_event: &Sender<SignalEvent>) -> Result<(), Error> {
    let mut sighup = signal(SignalKind::hangup()).map_err(Error::SignalHandler)?;
    let mut sigint = signal(SignalKind::interrupt()).map_err(Error::SignalHandler)?;
    let mut sigterm = signal(SignalKind::terminate()).map_err(Error::SignalHandler)?;

    loop {
        tokio::select! {
            _ = sighup.recv() => {
                signal_event.send_async(SignalEvent::SigHup).await?;
            }
            _ = sigint.recv() => {
                signal_event.send_async(SignalEvent::SigInt).await?;
            }
            _ = sigterm.recv() => {
                signal_event.send_async(SignalEvent::SigTerm).await?;
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum SignalEvent {
    /// Reload the rule configuration.
    SigHup,
    SigInt,
    SigTerm,
}
