#![forbid(unsafe_code)]

mod support;

use config::{Config, ProcessSpec, ReportRule, RuleKind};
use orchestrator::{CheckEngine, ControlEvent, ProcessCheck, ReloadBundle};
use pretty_assertions::assert_eq;
use std::sync::atomic::Ordering;
use std::time::Duration;
use support::{FailingProvider, FixtureProvider, process, services};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn flag_rule(property: &str, as_key: &str) -> ReportRule {
    ReportRule {
        kind: RuleKind::Flag,
        property: property.to_owned(),
        as_key: as_key.to_owned(),
        value: None,
    }
}

fn spec(name: &str, report: Vec<ReportRule>) -> ProcessSpec {
    ProcessSpec {
        name: name.to_owned(),
        report,
    }
}

#[test]
fn checks_in_one_cycle_share_a_single_enumeration() {
    let (provider, calls) = FixtureProvider::new(vec![
        (1, process("proc1", &["--path=foo"])),
        (2, process("proc2", &["--mode=strict"])),
        (3, process("proc3", &["bare"])),
    ]);
    let (services, events) = services(provider);

    let mut config = Config::new();
    config.checks = vec![
        spec("proc1", vec![flag_rule("--path", "path")]),
        spec("proc2", vec![flag_rule("--mode", "mode")]),
        spec("proc3", vec![flag_rule("--missing", "missing")]),
    ];
    let mut engine = CheckEngine::new(config, services);

    let report = engine.tick().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.evaluated, 3);
    assert_eq!(report.reported, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(events.lock().len(), 2);
}

#[test]
fn cycle_ids_are_monotonic() {
    let (provider, _) = FixtureProvider::new(vec![]);
    let (services, _) = services(provider);
    let mut engine = CheckEngine::new(Config::new(), services);

    assert_eq!(engine.tick().unwrap().cycle_id, 1);
    assert_eq!(engine.tick().unwrap().cycle_id, 2);
}

#[test]
fn provider_failure_fails_the_cycle() {
    let (services, events) = services(FailingProvider);
    let mut config = Config::new();
    config.checks = vec![spec("proc1", vec![flag_rule("--path", "path")])];
    let mut engine = CheckEngine::new(config, services);

    assert!(engine.tick().is_err());
    assert!(events.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn reload_swaps_config_and_checks() {
    let (provider, _) = FixtureProvider::new(vec![(1, process("proc1", &["--path=foo"]))]);
    let (services, _) = services(provider);

    let mut config = Config::new();
    config.checks = vec![spec("proc1", vec![flag_rule("--path", "path")])];
    let mut engine = CheckEngine::new(config, services);

    let (control_tx, control_rx) = mpsc::unbounded_channel();
    let mut new_config = Config::new();
    new_config.engine.cycle = Duration::from_secs(10);
    new_config.checks = vec![spec("proc2", vec![flag_rule("--mode", "mode")])];
    let checks = new_config
        .checks
        .iter()
        .cloned()
        .map(ProcessCheck::new)
        .collect();
    control_tx
        .send(ControlEvent::Reload(ReloadBundle {
            config: new_config,
            checks,
        }))
        .unwrap();

    let cancel = CancellationToken::new();
    let stopper = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        stopper.cancel();
    });

    engine.run_until(cancel, control_rx).await.unwrap();

    assert_eq!(engine.checks().len(), 1);
    assert_eq!(engine.checks()[0].name(), "proc2");
    assert_eq!(engine.config().engine.cycle, Duration::from_secs(10));
}

#[tokio::test(start_paused = true)]
async fn run_until_stops_on_cancellation() {
    let (provider, _) = FixtureProvider::new(vec![]);
    let (services, _) = services(provider);
    let mut engine = CheckEngine::new(Config::new(), services);

    let (_control_tx, control_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    cancel.cancel();

    engine.run_until(cancel, control_rx).await.unwrap();
}
