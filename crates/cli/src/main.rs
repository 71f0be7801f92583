use clap::Parser;
use config::Config;
use flume::bounded;
use kernel::ProcfsProvider;
use orchestrator::{
    CheckEngine, ControlEvent, LogReporter, ProcessCheck, ReloadBundle, Services, SnapshotCache,
    SystemClock,
};
use procsentry::cli::Cli;
use procsentry::signals::{SignalEvent, wait_for_signal};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tracing_log::AsTrace;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.log_level_filter().as_trace())
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    debug!(config = ?cli);

    let config = match &cli.conffile {
        Some(path) => Config::load(path)?,
        _ => Config::new(),
    };

    let services = Services {
        provider: Box::new(ProcfsProvider),
        reporter: Box::new(LogReporter),
        cache: Arc::new(SnapshotCache::new()),
        clock: Box::new(SystemClock),
    };
    let mut engine = CheckEngine::new(config, services);

    if cli.oneshot {
        let report = engine.tick()?;
        info!(
            evaluated = report.evaluated,
            reported = report.reported,
            skipped = report.skipped,
            "one-shot evaluation finished"
        );
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let (control_tx, control_rx) = mpsc::unbounded_channel();
    let (events_tx, events_rx) = bounded(8);

    tokio::spawn(async move {
        if let Err(err) = wait_for_signal(&events_tx).await {
            error!(error = ?err, "signal listener failed");
        }
    });

    let engine_cancel = cancel.clone();
    let mut engine_task =
        tokio::spawn(async move { engine.run_until(engine_cancel, control_rx).await });

    loop {
        tokio::select! {
            res = &mut engine_task => {
                res??;
                break;
            }
            res = events_rx.recv_async() => {
                match res? {
                    SignalEvent::SigHup => reload(&cli, &control_tx),
                    SignalEvent::SigInt | SignalEvent::SigTerm => cancel.cancel(),
                }
            }
        }
    }

    Ok(())
}

/// Re-reads the rule configuration and hands it to the running engine.
/// A broken config file keeps the previous rules in place.
fn reload(cli: &Cli, control_tx: &mpsc::UnboundedSender<ControlEvent>) {
    let Some(path) = &cli.conffile else {
        warn!("no config file to reload");
        return;
    };
    match Config::load(path) {
        Ok(config) => {
            let checks = config
                .checks
                .iter()
                .cloned()
                .map(ProcessCheck::new)
                .collect();
            let bundle = ReloadBundle { config, checks };
            if control_tx.send(ControlEvent::Reload(bundle)).is_err() {
                warn!("engine is gone; reload dropped");
            }
        }
        Err(err) => error!(%err, "config reload failed; keeping previous config"),
    }
}
