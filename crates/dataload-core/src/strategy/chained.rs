use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::models::{
    ExecutionRecord, ExecutionSummary, LoadError, LoadErrorKind, LoadResult, StrategyKind, Task,
    TaskSet,
};
use crate::pool::{WorkerPool, join_failure};
use crate::report::ReportSink;
use crate::strategy::{LoadContext, LoadStrategy, summarize};
use crate::timer::{Timer, current_worker};

type Stage = JoinHandle<LoadResult<Vec<ExecutionRecord>>>;

/// Runs the first task asynchronously and every later task as a continuation of its
/// predecessor's result. Stages never overlap, so the total matches the sequential strategy.
pub struct ChainedStrategy {
    context: LoadContext,
}

impl ChainedStrategy {
    pub fn new(context: LoadContext) -> Self {
        Self { context }
    }

    fn run(&self, tasks: &TaskSet, started: Instant) -> LoadResult<ExecutionSummary> {
        let strategy = self.kind();
        let mut pool = WorkerPool::start(&self.context.pool, tasks.len(), &self.context.monitor)?;
        let timer = self.context.timer(strategy);
        let handle = pool.handle()?.clone();

        let mut steps = tasks.iter();
        let first = steps.next().ok_or_else(|| {
            LoadError::new(LoadErrorKind::InvalidConfig, "cannot chain an empty task set")
        })?;
        let head = run_async(&handle, timer.clone(), first);
        let tail = steps.fold(head, |previous, task| {
            then_run(&handle, previous, timer.clone(), task)
        });
        let terminal = when_complete(&handle, tail, self.context.reporter.clone(), strategy);

        // The only point where the driver waits.
        let records = pool.block_on(terminal)?.map_err(join_failure)??;

        pool.shutdown();
        Ok(summarize(strategy, started, &records))
    }
}

impl LoadStrategy for ChainedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Chained
    }

    fn load(&self, tasks: &TaskSet) -> LoadResult<ExecutionSummary> {
        self.run(tasks, Instant::now())
            .map_err(|error| error.attribute(self.kind(), None))
    }
}

fn run_async(handle: &Handle, timer: Timer, task: Task) -> Stage {
    handle.spawn(async move { Ok(vec![timer.execute(task).await]) })
}

/// Starts `task` once `previous` has produced a result. A faulted predecessor skips the task
/// and hands the fault down the chain.
fn then_run(handle: &Handle, previous: Stage, timer: Timer, task: Task) -> Stage {
    handle.spawn(async move {
        let mut records = previous.await.map_err(join_failure)??;
        records.push(timer.execute(task).await);
        Ok::<_, LoadError>(records)
    })
}

/// Terminal callback: observes the chain's result or fault and reports it exactly once.
fn when_complete(
    handle: &Handle,
    previous: Stage,
    reporter: Arc<dyn ReportSink>,
    strategy: StrategyKind,
) -> Stage {
    handle.spawn(async move {
        let outcome = previous.await.map_err(join_failure).and_then(|chain| chain);
        let worker = current_worker();

        match &outcome {
            Ok(records) => tracing::info!(
                strategy = %strategy,
                worker = %worker,
                completed = records.len(),
                "load chain completed"
            ),
            Err(error) => tracing::error!(
                strategy = %strategy,
                worker = %worker,
                kind = ?error.kind,
                message = %error.message,
                "load chain faulted"
            ),
        }

        reporter.chain_completed(&worker, outcome.as_ref().err());
        outcome
    })
}
