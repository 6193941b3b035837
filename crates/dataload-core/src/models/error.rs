use thiserror::Error;

use crate::models::{StrategyKind, TaskKind};

pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LoadErrorKind {
    InvalidConfig,
    PoolUnavailable,
    PoolShutdown,
    TaskFailed,
    Internal,
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind:?}: {message}")]
pub struct LoadError {
    pub strategy: Option<StrategyKind>,
    pub task: Option<TaskKind>,
    pub kind: LoadErrorKind,
    pub message: String,
}

impl LoadError {
    pub fn new(kind: LoadErrorKind, message: impl Into<String>) -> Self {
        Self {
            strategy: None,
            task: None,
            kind,
            message: message.into(),
        }
    }

    /// Fills in strategy and task context the error does not already carry.
    pub fn attribute(self, strategy: StrategyKind, task: Option<TaskKind>) -> Self {
        Self {
            strategy: self.strategy.or(Some(strategy)),
            task: self.task.or(task),
            kind: self.kind,
            message: self.message,
        }
    }
}
