use std::fmt::{Display, Formatter};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::TaskKind;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Sequential,
    PooledBlocking,
    PooledFirstCompleted,
    Chained,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Sequential,
        StrategyKind::PooledBlocking,
        StrategyKind::PooledFirstCompleted,
        StrategyKind::Chained,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Sequential => "sequential",
            StrategyKind::PooledBlocking => "pooled_blocking",
            StrategyKind::PooledFirstCompleted => "pooled_first_completed",
            StrategyKind::Chained => "chained",
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the timer saw for one task: who ran it and for how long.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub task: TaskKind,
    pub worker: String,
    pub elapsed: Duration,
    pub interrupted: bool,
}

impl ExecutionRecord {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub strategy: StrategyKind,
    pub elapsed: Duration,
    /// Tasks in the order the strategy observed their results.
    pub observed: Vec<TaskKind>,
    pub interrupted: usize,
}

impl ExecutionSummary {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    pub fn completed(&self) -> usize {
        self.observed.len()
    }
}
