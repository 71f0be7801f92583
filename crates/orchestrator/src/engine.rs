#![forbid(unsafe_code)]

use crate::check::{CheckStatus, ProcessCheck, SNAPSHOT_KEY, SnapshotCache};
use crate::clock::Clock;
use crate::error::Error;
use crate::report::Reporter;
use config::Config;
use kernel::SnapshotProvider;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Collaborators injected into the engine. Tests substitute fixture
/// providers and recording reporters here; nothing is reached through
/// globals.
pub struct Services {
    pub provider: Box<dyn SnapshotProvider + Send + Sync>,
    pub reporter: Box<dyn Reporter + Send + Sync>,
    pub cache: Arc<SnapshotCache>,
    pub clock: Box<dyn Clock + Send + Sync>,
}

pub struct ReloadBundle {
    pub config: Config,
    pub checks: Vec<ProcessCheck>,
}

pub enum ControlEvent {
    Reload(ReloadBundle),
}

#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub cycle_id: u64,
    pub evaluated: usize,
    pub reported: usize,
    pub skipped: usize,
}

pub struct CheckEngine {
    config: Config,
    services: Services,
    checks: Vec<ProcessCheck>,
    cycle_id: u64,
}

impl CheckEngine {
    pub fn new(config: Config, services: Services) -> Self {
        let checks = config
            .checks
            .iter()
            .cloned()
            .map(ProcessCheck::new)
            .collect();
        Self {
            config,
            services,
            checks,
            cycle_id: 0,
        }
    }

    /// Evaluate every check once. Checks within a cycle share one
    /// process-table view through the snapshot cache.
    pub fn tick(&mut self) -> Result<TickReport, Error> {
        self.cycle_id = self.cycle_id.saturating_add(1);
        let mut report = TickReport {
            cycle_id: self.cycle_id,
            ..Default::default()
        };

        for check in &self.checks {
            let status = check.run(&self.services, self.config.engine.snapshot_ttl)?;
            report.evaluated += 1;
            match status {
                CheckStatus::Reported => report.reported += 1,
                CheckStatus::Skipped => report.skipped += 1,
            }
        }

        debug!(
            cycle = report.cycle_id,
            evaluated = report.evaluated,
            reported = report.reported,
            "evaluation cycle finished"
        );
        Ok(report)
    }

    /// Run evaluation cycles until the cancellation token fires.
    ///
    /// A failed cycle is logged and retried next cycle; retry policy
    /// beyond that belongs to whoever schedules the engine. Reload
    /// events swap config and checks between cycles.
    pub async fn run_until(
        &mut self,
        cancel: CancellationToken,
        mut control_rx: mpsc::UnboundedReceiver<ControlEvent>,
    ) -> Result<(), Error> {
        loop {
            // Apply queued reloads before evaluating, so a cycle never
            // runs against config it is about to lose.
            while let Ok(event) = control_rx.try_recv() {
                self.handle_control(event);
            }

            let cycle_start = self.services.clock.now();
            let mut did_tick = false;
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("shutdown requested");
                    break;
                }
                Some(event) = control_rx.recv() => {
                    self.handle_control(event);
                }
                result = async { self.tick() } => {
                    if let Err(err) = result {
                        warn!(%err, "evaluation cycle failed");
                    }
                    did_tick = true;
                }
            }

            if did_tick {
                let elapsed = cycle_start.elapsed();
                if elapsed < self.config.engine.cycle {
                    self.services
                        .clock
                        .sleep(self.config.engine.cycle - elapsed)
                        .await;
                }
            }
        }

        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read-only access to the configured checks (useful for tests).
    pub fn checks(&self) -> &[ProcessCheck] {
        &self.checks
    }

    fn handle_control(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Reload(bundle) => {
                self.config = bundle.config;
                self.checks = bundle.checks;
                // The next cycle re-enumerates under the new rules.
                self.services.cache.delete(&SNAPSHOT_KEY.to_owned());
                info!("config reloaded");
            }
        }
    }
}
