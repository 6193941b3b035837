mod support;

use dataload_core::harness::Harness;
use dataload_core::models::{StrategyKind, TaskKind};
use dataload_core::pool::PoolMonitor;
use dataload_core::strategy::strategy_for;

use support::{RecordingReporter, context, scaled_tasks};

#[test]
fn run_times_the_whole_load_and_reports_the_summary() {
    let reporter = RecordingReporter::new();
    let monitor = PoolMonitor::new();
    let strategy = strategy_for(StrategyKind::PooledBlocking, context(&reporter, &monitor));

    let run = Harness::new(reporter.clone()).run(strategy.as_ref(), &scaled_tasks());

    assert!(run.is_success());
    let summary = run.outcome.as_ref().unwrap();
    assert!(run.elapsed >= summary.elapsed);
    assert_eq!(reporter.started(), vec![StrategyKind::PooledBlocking]);

    let completed = reporter.completed();
    assert_eq!(completed.len(), 1);
    assert_eq!(&completed[0].0, summary);
    assert_eq!(completed[0].1, run.elapsed);
    assert!(reporter.failed().is_empty());
}

#[test]
fn run_all_covers_every_strategy_in_order() {
    let reporter = RecordingReporter::new();
    let monitor = PoolMonitor::new();

    let runs =
        Harness::new(reporter.clone()).run_all(&context(&reporter, &monitor), &scaled_tasks());

    let kinds: Vec<_> = runs.iter().map(|run| run.strategy).collect();
    assert_eq!(kinds, StrategyKind::ALL.to_vec());
    assert!(runs.iter().all(|run| run.is_success()));
    assert_eq!(reporter.records().len(), 12);
    assert_eq!(reporter.completed().len(), 4);
    assert!(monitor.is_quiescent());
}

#[test]
fn failed_load_keeps_earlier_task_reports_and_omits_the_summary() {
    let reporter = RecordingReporter::panicking_on(TaskKind::Orders);
    let monitor = PoolMonitor::new();
    let strategy = strategy_for(StrategyKind::PooledBlocking, context(&reporter, &monitor));

    let run = Harness::new(reporter.clone()).run(strategy.as_ref(), &scaled_tasks());

    assert!(!run.is_success());
    assert_eq!(
        reporter.reported_order(),
        vec![TaskKind::Configurations, TaskKind::Users]
    );
    assert!(reporter.completed().is_empty());
    let failed = reporter.failed();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, StrategyKind::PooledBlocking);
    assert_eq!(failed[0].1.task, Some(TaskKind::Orders));
}

#[test]
fn summary_serializes_for_external_consumers() {
    let reporter = RecordingReporter::new();
    let monitor = PoolMonitor::new();
    let strategy = strategy_for(StrategyKind::Chained, context(&reporter, &monitor));

    let summary = strategy.load(&scaled_tasks()).unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["strategy"], "chained");
    assert_eq!(
        json["observed"],
        serde_json::json!(["configurations", "users", "orders"])
    );
    assert_eq!(json["interrupted"], 0);
}
