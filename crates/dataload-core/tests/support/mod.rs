#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use dataload_core::models::{
    ExecutionRecord, ExecutionSummary, LoadError, LoadErrorKind, StrategyKind, TaskKind, TaskSet,
};
use dataload_core::pool::PoolMonitor;
use dataload_core::report::ReportSink;
use dataload_core::strategy::LoadContext;

#[derive(Default)]
pub struct RecordingReporter {
    panic_on: Option<TaskKind>,
    started: Mutex<Vec<StrategyKind>>,
    records: Mutex<Vec<ExecutionRecord>>,
    chains: Mutex<Vec<(String, Option<LoadErrorKind>)>>,
    completed: Mutex<Vec<(ExecutionSummary, Duration)>>,
    failed: Mutex<Vec<(StrategyKind, LoadError)>>,
}

impl RecordingReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Panics while reporting `task`, which faults the unit of work that ran it.
    pub fn panicking_on(task: TaskKind) -> Arc<Self> {
        Arc::new(Self {
            panic_on: Some(task),
            ..Self::default()
        })
    }

    pub fn records(&self) -> Vec<ExecutionRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn reported_order(&self) -> Vec<TaskKind> {
        self.records().iter().map(|record| record.task).collect()
    }

    pub fn started(&self) -> Vec<StrategyKind> {
        self.started.lock().unwrap().clone()
    }

    pub fn chains(&self) -> Vec<(String, Option<LoadErrorKind>)> {
        self.chains.lock().unwrap().clone()
    }

    pub fn completed(&self) -> Vec<(ExecutionSummary, Duration)> {
        self.completed.lock().unwrap().clone()
    }

    pub fn failed(&self) -> Vec<(StrategyKind, LoadError)> {
        self.failed.lock().unwrap().clone()
    }
}

impl ReportSink for RecordingReporter {
    fn load_started(&self, strategy: StrategyKind, _started_at: SystemTime) {
        self.started.lock().unwrap().push(strategy);
    }

    fn task_completed(&self, record: &ExecutionRecord) {
        if self.panic_on == Some(record.task) {
            panic!("reporter rejected {}", record.task.label());
        }
        self.records.lock().unwrap().push(record.clone());
    }

    fn chain_completed(&self, worker: &str, fault: Option<&LoadError>) {
        self.chains
            .lock()
            .unwrap()
            .push((worker.to_string(), fault.map(|error| error.kind)));
    }

    fn load_completed(&self, summary: &ExecutionSummary, elapsed: Duration) {
        self.completed
            .lock()
            .unwrap()
            .push((summary.clone(), elapsed));
    }

    fn load_failed(&self, strategy: StrategyKind, error: &LoadError) {
        self.failed.lock().unwrap().push((strategy, error.clone()));
    }
}

pub fn millis(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// The standard set shrunk tenfold: 100, 200 and 300 ms.
pub fn scaled_tasks() -> TaskSet {
    TaskSet::from_durations(millis(100), millis(200), millis(300))
}

pub fn context(reporter: &Arc<RecordingReporter>, monitor: &PoolMonitor) -> LoadContext {
    LoadContext::new(reporter.clone()).with_monitor(monitor.clone())
}

pub fn sorted(mut kinds: Vec<TaskKind>) -> Vec<TaskKind> {
    kinds.sort_by_key(|kind| TaskKind::ALL.iter().position(|candidate| candidate == kind));
    kinds
}
