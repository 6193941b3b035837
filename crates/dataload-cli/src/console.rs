use std::time::{Duration, SystemTime};

use dataload_core::models::{ExecutionRecord, ExecutionSummary, LoadError, StrategyKind};
use dataload_core::report::ReportSink;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Prints one line per report to stdout.
pub struct ConsoleReporter;

impl ReportSink for ConsoleReporter {
    fn load_started(&self, strategy: StrategyKind, started_at: SystemTime) {
        let timestamp = OffsetDateTime::from(started_at)
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown time".to_string());
        println!("== {strategy} load started at {timestamp}");
    }

    fn task_completed(&self, record: &ExecutionRecord) {
        let suffix = if record.interrupted { " (interrupted)" } else { "" };
        println!(
            "[Thread: {}] {} costs: {} ms{suffix}",
            record.worker,
            record.task.label(),
            record.elapsed_ms()
        );
    }

    fn chain_completed(&self, worker: &str, fault: Option<&LoadError>) {
        match fault {
            None => println!("[Thread: {worker}] Load completed."),
            Some(error) => println!("[Thread: {worker}] Load completed with fault: {error}"),
        }
    }

    fn load_completed(&self, _summary: &ExecutionSummary, elapsed: Duration) {
        println!("load() total cost: {} ms", elapsed.as_millis());
    }

    fn load_failed(&self, strategy: StrategyKind, error: &LoadError) {
        println!("load() failed for {strategy}: {error}");
    }
}
