use std::time::Instant;

use tokio::task::JoinSet;

use crate::models::{
    ExecutionSummary, LoadError, LoadErrorKind, LoadResult, StrategyKind, TaskSet,
};
use crate::pool::{WorkerPool, join_failure};
use crate::strategy::{LoadContext, LoadStrategy, summarize};

/// Submits every task to a private pool and drains results in the order they finish.
pub struct PooledFirstCompletedStrategy {
    context: LoadContext,
}

impl PooledFirstCompletedStrategy {
    pub fn new(context: LoadContext) -> Self {
        Self { context }
    }
}

impl LoadStrategy for PooledFirstCompletedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PooledFirstCompleted
    }

    fn load(&self, tasks: &TaskSet) -> LoadResult<ExecutionSummary> {
        let strategy = self.kind();
        let started = Instant::now();
        let mut pool = WorkerPool::start(&self.context.pool, tasks.len(), &self.context.monitor)
            .map_err(|error| error.attribute(strategy, None))?;
        let timer = self.context.timer(strategy);
        let handle = pool
            .handle()
            .map_err(|error| error.attribute(strategy, None))?
            .clone();

        // Declared after the pool so unfinished tasks are aborted before the pool shuts down.
        let mut completions = JoinSet::new();
        for task in tasks.iter() {
            let timer = timer.clone();
            completions.spawn_on(async move { timer.execute(task).await }, &handle);
        }

        let expected = tasks.len();
        let records = pool
            .block_on(async {
                let mut records = Vec::with_capacity(expected);
                while records.len() < expected {
                    match completions.join_next().await {
                        Some(Ok(record)) => {
                            tracing::debug!(
                                strategy = %strategy,
                                task = record.task.label(),
                                completed = records.len() + 1,
                                expected,
                                "drained completed task"
                            );
                            records.push(record);
                        }
                        Some(Err(error)) => return Err(join_failure(error)),
                        None => {
                            return Err(LoadError::new(
                                LoadErrorKind::Internal,
                                format!(
                                    "completion queue emptied after {} of {expected} tasks",
                                    records.len()
                                ),
                            ));
                        }
                    }
                }
                Ok(records)
            })
            .and_then(|drained| drained)
            .map_err(|error| error.attribute(strategy, None))?;

        drop(completions);
        pool.shutdown();
        Ok(summarize(strategy, started, &records))
    }
}
