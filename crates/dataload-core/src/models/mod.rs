pub mod error;
pub mod record;
pub mod task;

pub use error::{LoadError, LoadErrorKind, LoadResult};
pub use record::{ExecutionRecord, ExecutionSummary, StrategyKind};
pub use task::{Task, TaskKind, TaskSet};
