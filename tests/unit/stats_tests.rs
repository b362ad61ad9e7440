// Stats counter unit tests

use imgate::stats::{Counter, StatsCounter, StatsTicker};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_rate_over_window() {
    let stats = StatsCounter::new(3);
    stats.tick();
    for _ in 0..5 {
        stats.increment(Counter::Requests);
    }
    stats.tick();

    assert_eq!(stats.rate(Counter::Requests), 5);
    assert_eq!(stats.rate(Counter::Failures), 0);
}

#[test]
fn test_window_never_exceeds_period() {
    let stats = StatsCounter::new(4);
    for _ in 0..10 {
        stats.increment(Counter::Success);
        stats.tick();
    }
    for counter in Counter::ALL {
        assert_eq!(stats.window_len(counter), 4);
    }
}

#[test]
fn test_report_matches_counters() {
    let stats = StatsCounter::new(10);
    stats.increment(Counter::Requests);
    stats.increment(Counter::Failures);

    let report = stats.report();
    assert_eq!(report.value(Counter::Requests), 1);
    assert_eq!(report.value(Counter::Failures), 1);
    assert_eq!(report.value(Counter::Success), 0);
    assert!(report.to_string().contains("nb_failures_10s: 0"));
}

#[tokio::test]
async fn test_ticker_fills_window() {
    let stats = Arc::new(StatsCounter::new(300));
    let ticker = StatsTicker::with_interval(Arc::clone(&stats), Duration::from_millis(10));
    let (tx, rx) = tokio::sync::watch::channel(false);

    let handle = tokio::spawn(async move { ticker.run(rx).await });
    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.send(true).unwrap();
    handle.await.unwrap();

    assert!(stats.window_len(Counter::Requests) >= 2);
}
