mod console;

use std::process::ExitCode;
use std::sync::Arc;

use dataload_core::harness::Harness;
use dataload_core::models::TaskSet;
use dataload_core::strategy::LoadContext;
use tracing_subscriber::EnvFilter;

use crate::console::ConsoleReporter;

fn main() -> ExitCode {
    // Logs go to stderr so the report lines on stdout stay readable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let reporter = Arc::new(ConsoleReporter);
    let harness = Harness::new(reporter.clone());
    let runs = harness.run_all(&LoadContext::new(reporter), &TaskSet::standard());

    if runs.iter().all(|run| run.is_success()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
