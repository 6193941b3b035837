use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use crate::models::{ExecutionSummary, LoadResult, StrategyKind, TaskSet};
use crate::report::ReportSink;
use crate::strategy::{LoadContext, LoadStrategy, strategy_for};

#[derive(Clone, Debug)]
pub struct HarnessRun {
    pub strategy: StrategyKind,
    pub started_at: SystemTime,
    pub elapsed: Duration,
    pub outcome: LoadResult<ExecutionSummary>,
}

impl HarnessRun {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Times whole `load()` invocations and hands the result to the reporter.
pub struct Harness {
    reporter: Arc<dyn ReportSink>,
}

impl Harness {
    pub fn new(reporter: Arc<dyn ReportSink>) -> Self {
        Self { reporter }
    }

    pub fn run(&self, strategy: &dyn LoadStrategy, tasks: &TaskSet) -> HarnessRun {
        let kind = strategy.kind();
        let started_at = SystemTime::now();
        self.reporter.load_started(kind, started_at);

        let started = Instant::now();
        let outcome = strategy.load(tasks);
        let elapsed = started.elapsed();

        match &outcome {
            Ok(summary) => {
                tracing::info!(
                    strategy = %kind,
                    elapsed_ms = elapsed.as_millis() as u64,
                    observed = ?summary.observed,
                    interrupted = summary.interrupted,
                    "load finished"
                );
                self.reporter.load_completed(summary, elapsed);
            }
            Err(error) => {
                tracing::error!(
                    strategy = %kind,
                    task = ?error.task,
                    kind = ?error.kind,
                    message = %error.message,
                    "load failed"
                );
                self.reporter.load_failed(kind, error);
            }
        }

        HarnessRun {
            strategy: kind,
            started_at,
            elapsed,
            outcome,
        }
    }

    /// Runs each strategy once, in declaration order, against the same task set.
    pub fn run_all(&self, context: &LoadContext, tasks: &TaskSet) -> Vec<HarnessRun> {
        StrategyKind::ALL
            .into_iter()
            .map(|kind| self.run(strategy_for(kind, context.clone()).as_ref(), tasks))
            .collect()
    }
}
