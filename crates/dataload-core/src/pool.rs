use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::{JoinError, JoinHandle};

use crate::models::{LoadError, LoadErrorKind, LoadResult};

static NEXT_POOL_ID: AtomicUsize = AtomicUsize::new(1);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// `None` sizes the pool to the number of submitted tasks.
    pub workers: Option<usize>,
    pub thread_name_prefix: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: None,
            thread_name_prefix: "pool".to_string(),
        }
    }
}

impl PoolConfig {
    pub fn worker_count(&self, task_count: usize) -> LoadResult<usize> {
        match self.workers {
            Some(0) => Err(LoadError::new(
                LoadErrorKind::InvalidConfig,
                "worker pool requires at least one worker",
            )),
            Some(workers) => Ok(workers),
            None if task_count == 0 => Err(LoadError::new(
                LoadErrorKind::InvalidConfig,
                "cannot size a worker pool for an empty task set",
            )),
            None => Ok(task_count),
        }
    }
}

/// Counts worker threads and pool lifecycles across every pool started with it.
#[derive(Clone, Debug, Default)]
pub struct PoolMonitor {
    counters: Arc<MonitorCounters>,
}

#[derive(Debug, Default)]
struct MonitorCounters {
    live_workers: AtomicUsize,
    pools_started: AtomicUsize,
    pools_shut_down: AtomicUsize,
}

impl PoolMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_workers(&self) -> usize {
        self.counters.live_workers.load(Ordering::SeqCst)
    }

    pub fn pools_started(&self) -> usize {
        self.counters.pools_started.load(Ordering::SeqCst)
    }

    pub fn pools_shut_down(&self) -> usize {
        self.counters.pools_shut_down.load(Ordering::SeqCst)
    }

    /// True when every started pool has been shut down and none of their threads is alive.
    pub fn is_quiescent(&self) -> bool {
        self.live_workers() == 0 && self.pools_started() == self.pools_shut_down()
    }

    fn worker_started(&self) {
        self.counters.live_workers.fetch_add(1, Ordering::SeqCst);
    }

    fn worker_stopped(&self) {
        self.counters.live_workers.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A fixed-size set of runtime worker threads owned by a single load. Dropping the pool shuts
/// it down and joins its threads.
pub struct WorkerPool {
    id: usize,
    workers: usize,
    runtime: Option<Runtime>,
    monitor: PoolMonitor,
}

impl WorkerPool {
    pub fn start(
        config: &PoolConfig,
        task_count: usize,
        monitor: &PoolMonitor,
    ) -> LoadResult<Self> {
        let workers = config.worker_count(task_count)?;
        let id = NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed);
        let prefix = format!("{}-{id}-thread-", config.thread_name_prefix);
        let next_thread = Arc::new(AtomicUsize::new(1));
        let on_start = monitor.clone();
        let on_stop = monitor.clone();

        let runtime = Builder::new_multi_thread()
            .worker_threads(workers)
            .thread_name_fn(move || {
                format!("{prefix}{}", next_thread.fetch_add(1, Ordering::Relaxed))
            })
            .on_thread_start(move || on_start.worker_started())
            .on_thread_stop(move || on_stop.worker_stopped())
            .enable_time()
            .build()
            .map_err(|error| {
                LoadError::new(
                    LoadErrorKind::PoolUnavailable,
                    format!("failed to start worker pool: {error}"),
                )
            })?;

        monitor
            .counters
            .pools_started
            .fetch_add(1, Ordering::SeqCst);
        tracing::debug!(pool = id, workers, "worker pool started");

        Ok(Self {
            id,
            workers,
            runtime: Some(runtime),
            monitor: monitor.clone(),
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn is_shut_down(&self) -> bool {
        self.runtime.is_none()
    }

    pub fn handle(&self) -> LoadResult<&Handle> {
        Ok(self.runtime()?.handle())
    }

    pub fn spawn<F>(&self, future: F) -> LoadResult<JoinHandle<F::Output>>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        Ok(self.runtime()?.spawn(future))
    }

    /// Blocks the calling thread until `future` resolves.
    pub fn block_on<F: Future>(&self, future: F) -> LoadResult<F::Output> {
        Ok(self.runtime()?.block_on(future))
    }

    /// Stops accepting work and joins every worker thread. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            drop(runtime);
            self.monitor
                .counters
                .pools_shut_down
                .fetch_add(1, Ordering::SeqCst);
            tracing::debug!(pool = self.id, "worker pool shut down");
        }
    }

    fn runtime(&self) -> LoadResult<&Runtime> {
        self.runtime.as_ref().ok_or_else(|| {
            LoadError::new(
                LoadErrorKind::PoolShutdown,
                format!("worker pool {} no longer accepts work", self.id),
            )
        })
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

pub fn join_failure(error: JoinError) -> LoadError {
    let message = if error.is_panic() {
        "pooled task panicked".to_string()
    } else {
        format!("pooled task did not complete: {error}")
    };
    LoadError::new(LoadErrorKind::TaskFailed, message)
}
