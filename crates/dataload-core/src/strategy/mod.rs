pub mod chained;
pub mod pooled_blocking;
pub mod pooled_first_completed;
pub mod sequential;

pub use chained::ChainedStrategy;
pub use pooled_blocking::PooledBlockingStrategy;
pub use pooled_first_completed::PooledFirstCompletedStrategy;
pub use sequential::SequentialStrategy;

use std::sync::Arc;
use std::time::Instant;

use crate::models::{ExecutionRecord, ExecutionSummary, LoadResult, StrategyKind, TaskSet};
use crate::pool::{PoolConfig, PoolMonitor};
use crate::report::{NullReporter, ReportSink};
use crate::timer::{InterruptHandle, Timer};

/// A policy for scheduling the task set and synchronizing on its results.
pub trait LoadStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Runs every task exactly once and returns once all results have been observed.
    fn load(&self, tasks: &TaskSet) -> LoadResult<ExecutionSummary>;
}

/// Collaborators shared by every strategy. Cloning is cheap; the pool itself is never shared,
/// only its configuration.
#[derive(Clone)]
pub struct LoadContext {
    pub reporter: Arc<dyn ReportSink>,
    pub pool: PoolConfig,
    pub interrupt: InterruptHandle,
    pub monitor: PoolMonitor,
}

impl LoadContext {
    pub fn new(reporter: Arc<dyn ReportSink>) -> Self {
        Self {
            reporter,
            pool: PoolConfig::default(),
            interrupt: InterruptHandle::new(),
            monitor: PoolMonitor::new(),
        }
    }

    pub fn with_pool(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }

    pub fn with_interrupt(mut self, interrupt: InterruptHandle) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn with_monitor(mut self, monitor: PoolMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    pub(crate) fn timer(&self, strategy: StrategyKind) -> Timer {
        Timer::new(strategy, self.reporter.clone(), self.interrupt.clone())
    }
}

impl Default for LoadContext {
    fn default() -> Self {
        Self::new(Arc::new(NullReporter))
    }
}

pub fn strategy_for(kind: StrategyKind, context: LoadContext) -> Box<dyn LoadStrategy> {
    match kind {
        StrategyKind::Sequential => Box::new(SequentialStrategy::new(context)),
        StrategyKind::PooledBlocking => Box::new(PooledBlockingStrategy::new(context)),
        StrategyKind::PooledFirstCompleted => {
            Box::new(PooledFirstCompletedStrategy::new(context))
        }
        StrategyKind::Chained => Box::new(ChainedStrategy::new(context)),
    }
}

fn summarize(
    strategy: StrategyKind,
    started: Instant,
    records: &[ExecutionRecord],
) -> ExecutionSummary {
    ExecutionSummary {
        strategy,
        elapsed: started.elapsed(),
        observed: records.iter().map(|record| record.task).collect(),
        interrupted: records.iter().filter(|record| record.interrupted).count(),
    }
}
