use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Notify;

use crate::models::{ExecutionRecord, StrategyKind, Task};
use crate::report::ReportSink;

/// Interrupts simulated delays that are in progress when `interrupt` is called. Delays that
/// start afterwards run to their full duration.
#[derive(Clone, Debug, Default)]
pub struct InterruptHandle {
    notify: Arc<Notify>,
}

impl InterruptHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interrupt(&self) {
        self.notify.notify_waiters();
    }

    async fn interrupted(&self) {
        self.notify.notified().await;
    }
}

#[derive(Clone)]
pub struct Timer {
    strategy: StrategyKind,
    reporter: Arc<dyn ReportSink>,
    interrupt: InterruptHandle,
}

impl Timer {
    pub fn new(
        strategy: StrategyKind,
        reporter: Arc<dyn ReportSink>,
        interrupt: InterruptHandle,
    ) -> Self {
        Self {
            strategy,
            reporter,
            interrupt,
        }
    }

    /// Runs the task's delay on the current worker and reports the record as soon as it ends.
    /// An interrupted delay is logged and reported with the time actually spent; it never
    /// fails the load.
    pub async fn execute(&self, task: Task) -> ExecutionRecord {
        let started = Instant::now();
        let interrupted = tokio::select! {
            () = tokio::time::sleep(task.duration) => false,
            () = self.interrupt.interrupted() => true,
        };

        let record = ExecutionRecord {
            task: task.kind,
            worker: current_worker(),
            elapsed: started.elapsed(),
            interrupted,
        };

        if interrupted {
            tracing::warn!(
                strategy = %self.strategy,
                task = task.label(),
                worker = %record.worker,
                elapsed_ms = record.elapsed_ms() as u64,
                "load delay interrupted; continuing with the remaining tasks"
            );
        } else {
            tracing::info!(
                strategy = %self.strategy,
                task = task.label(),
                worker = %record.worker,
                elapsed_ms = record.elapsed_ms() as u64,
                "task completed"
            );
        }

        self.reporter.task_completed(&record);
        record
    }
}

pub fn current_worker() -> String {
    let thread = std::thread::current();
    match thread.name() {
        Some(name) => name.to_string(),
        None => format!("{:?}", thread.id()),
    }
}
