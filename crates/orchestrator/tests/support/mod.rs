#![allow(dead_code)]

use kernel::{Error, ProcessInfo, ProcessSnapshot, SnapshotProvider};
use orchestrator::{Finding, Reporter, Services, SnapshotCache, SystemClock};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub type ReportedEvents = Arc<Mutex<Vec<(Vec<String>, Finding)>>>;

pub fn process(name: &str, cmdline: &[&str]) -> ProcessInfo {
    ProcessInfo {
        name: name.to_owned(),
        cmdline: cmdline.iter().map(|s| s.to_string()).collect(),
    }
}

/// Deterministic stand-in for the OS process table, counting fetches.
pub struct FixtureProvider {
    snapshot: ProcessSnapshot,
    calls: Arc<AtomicUsize>,
}

impl FixtureProvider {
    pub fn new(entries: Vec<(i32, ProcessInfo)>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = Self {
            snapshot: entries.into_iter().collect(),
            calls: Arc::clone(&calls),
        };
        (provider, calls)
    }
}

impl SnapshotProvider for FixtureProvider {
    fn fetch(&self) -> Result<ProcessSnapshot, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot.clone())
    }
}

pub struct FailingProvider;

impl SnapshotProvider for FailingProvider {
    fn fetch(&self) -> Result<ProcessSnapshot, Error> {
        Err(Error::Io(std::io::Error::other("process table unreadable")))
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    events: ReportedEvents,
}

impl RecordingReporter {
    pub fn new() -> (Self, ReportedEvents) {
        let reporter = Self::default();
        let events = Arc::clone(&reporter.events);
        (reporter, events)
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, tags: &[&str], finding: &Finding) {
        self.events
            .lock()
            .push((tags.iter().map(|s| s.to_string()).collect(), finding.clone()));
    }
}

/// Services wired with a fresh cache, a recording reporter, and the
/// given provider.
pub fn services(provider: impl SnapshotProvider + 'static) -> (Services, ReportedEvents) {
    let (reporter, events) = RecordingReporter::new();
    let services = Services {
        provider: Box::new(provider),
        reporter: Box::new(reporter),
        cache: Arc::new(SnapshotCache::new()),
        clock: Box::new(SystemClock),
    };
    (services, events)
}
