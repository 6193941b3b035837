use std::time::Instant;

use crate::models::{ExecutionSummary, LoadResult, StrategyKind, TaskSet};
use crate::pool::{WorkerPool, join_failure};
use crate::strategy::{LoadContext, LoadStrategy, summarize};

/// Submits every task to a private pool, then joins them strictly in submission order.
pub struct PooledBlockingStrategy {
    context: LoadContext,
}

impl PooledBlockingStrategy {
    pub fn new(context: LoadContext) -> Self {
        Self { context }
    }
}

impl LoadStrategy for PooledBlockingStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PooledBlocking
    }

    fn load(&self, tasks: &TaskSet) -> LoadResult<ExecutionSummary> {
        let strategy = self.kind();
        let started = Instant::now();
        let mut pool = WorkerPool::start(&self.context.pool, tasks.len(), &self.context.monitor)
            .map_err(|error| error.attribute(strategy, None))?;
        let timer = self.context.timer(strategy);

        let mut submitted = Vec::with_capacity(tasks.len());
        for task in tasks.iter() {
            let timer = timer.clone();
            let handle = pool
                .spawn(async move { timer.execute(task).await })
                .map_err(|error| error.attribute(strategy, Some(task.kind)))?;
            submitted.push((task.kind, handle));
        }

        let total = submitted.len();
        let mut records = Vec::with_capacity(total);
        for (kind, handle) in submitted {
            let record = pool
                .block_on(handle)
                .map_err(|error| error.attribute(strategy, Some(kind)))?
                .map_err(|error| join_failure(error).attribute(strategy, Some(kind)))?;
            records.push(record);
            tracing::debug!(
                strategy = %strategy,
                task = kind.label(),
                joined = records.len(),
                submitted = total,
                "joined pooled task"
            );
        }

        pool.shutdown();
        Ok(summarize(strategy, started, &records))
    }
}
