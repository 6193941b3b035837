use std::time::Instant;

use tokio::runtime::Builder;

use crate::models::{
    ExecutionSummary, LoadError, LoadErrorKind, LoadResult, StrategyKind, TaskSet,
};
use crate::strategy::{LoadContext, LoadStrategy, summarize};

/// Runs every task on the calling thread, one after another.
pub struct SequentialStrategy {
    context: LoadContext,
}

impl SequentialStrategy {
    pub fn new(context: LoadContext) -> Self {
        Self { context }
    }
}

impl LoadStrategy for SequentialStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Sequential
    }

    fn load(&self, tasks: &TaskSet) -> LoadResult<ExecutionSummary> {
        let started = Instant::now();
        let timer = self.context.timer(self.kind());

        // Drives the delays without leaving the caller's thread.
        let driver = Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|error| {
                LoadError::new(
                    LoadErrorKind::PoolUnavailable,
                    format!("failed to start calling-thread driver: {error}"),
                )
                .attribute(self.kind(), None)
            })?;

        let records = driver.block_on(async {
            let mut records = Vec::with_capacity(tasks.len());
            for task in tasks.iter() {
                records.push(timer.execute(task).await);
            }
            records
        });

        Ok(summarize(self.kind(), started, &records))
    }
}
