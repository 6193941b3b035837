use std::time::{Duration, SystemTime};

use crate::models::{ExecutionRecord, ExecutionSummary, LoadError, StrategyKind};

/// Consumer of the per-task and per-load reports. Implementations are called from pool
/// workers as well as the driving thread.
pub trait ReportSink: Send + Sync {
    fn load_started(&self, strategy: StrategyKind, started_at: SystemTime);

    fn task_completed(&self, record: &ExecutionRecord);

    /// Fired once by the terminal stage of a chained load, on the worker that ran it.
    fn chain_completed(&self, worker: &str, fault: Option<&LoadError>);

    /// `elapsed` is the end-to-end time measured around `load()`.
    fn load_completed(&self, summary: &ExecutionSummary, elapsed: Duration);

    fn load_failed(&self, strategy: StrategyKind, error: &LoadError);
}

/// Drops every report. Structured `tracing` events are still emitted by the core.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl ReportSink for NullReporter {
    fn load_started(&self, _strategy: StrategyKind, _started_at: SystemTime) {}

    fn task_completed(&self, _record: &ExecutionRecord) {}

    fn chain_completed(&self, _worker: &str, _fault: Option<&LoadError>) {}

    fn load_completed(&self, _summary: &ExecutionSummary, _elapsed: Duration) {}

    fn load_failed(&self, _strategy: StrategyKind, _error: &LoadError) {}
}
