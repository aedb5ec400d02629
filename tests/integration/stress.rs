//! Stress-test loop lifecycle: start guards, failure-rate warnings, and
//! manual-stop-only semantics.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use omega::dispatch::dispatch;
use omega::Severity;

use crate::fixtures::{build_context, default_context, lines_of, output_contains, MockProvider, MockRelayer};

/// A second `stress` warns and leaves the running loop's counters
/// untouched.
#[tokio::test(flavor = "multi_thread")]
async fn test_second_stress_does_not_reset_stats() {
    let mut ctx = default_context();
    // Long interval: only the immediate first tick runs during the test.
    ctx.stress_interval = Duration::from_secs(30);

    dispatch(&ctx, "stress").await;
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(ctx.session.read().await.stress_stats.wallets_created, 1);

    dispatch(&ctx, "stress").await;
    assert!(output_contains(&ctx, "Stress test already running. Use stopstress to stop.").await);

    let session = ctx.session.read().await;
    assert_eq!(session.stress_stats.wallets_created, 1);
    assert!(session.is_stress_testing);
}

/// Sends keep flowing and counters advance while the loop runs.
#[tokio::test(flavor = "multi_thread")]
async fn test_stress_sends_and_counts() {
    let provider = Arc::new(MockProvider::new());
    let ctx = build_context(Arc::new(MockRelayer::new(0.0)), provider.clone());

    dispatch(&ctx, "stress").await;
    tokio::time::sleep(Duration::from_millis(120)).await;
    dispatch(&ctx, "stopstress").await;
    // Let any in-flight iteration finish recording before comparing.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let session = ctx.session.read().await;
    let stats = &session.stress_stats;
    assert!(stats.transactions_sent >= 3);
    assert_eq!(stats.transactions_sent, stats.successful_txs);
    assert_eq!(stats.failed_txs, 0);
    assert_eq!(stats.wallets_created, 1);
    drop(session);

    assert_eq!(
        provider.sends.load(Ordering::SeqCst),
        ctx.session.read().await.stress_stats.transactions_sent
    );
}

/// A high failure rate emits a warning but never stops the loop.
#[tokio::test(flavor = "multi_thread")]
async fn test_high_failure_rate_warns_without_stopping() {
    let provider = Arc::new(MockProvider::new());
    provider.fail_sends.store(true, Ordering::SeqCst);
    let mut ctx = build_context(Arc::new(MockRelayer::new(0.0)), provider);
    ctx.stress_interval = Duration::from_millis(5);

    dispatch(&ctx, "stress").await;

    // Wait until well past the warning threshold (>10 attempts, >80% failed).
    tokio::time::sleep(Duration::from_millis(400)).await;

    let session = ctx.session.read().await;
    assert!(session.stress_stats.transactions_sent > 10);
    assert!(session.stress_stats.failure_rate() > 0.8);
    assert!(session.is_stress_testing, "loop must not auto-stop");
    drop(session);

    assert!(output_contains(&ctx, "High failure rate").await);
    // Send failures are benign status lines, not errors.
    assert!(lines_of(&ctx, Severity::Error).await.is_empty());

    dispatch(&ctx, "stopstress").await;
    assert!(!ctx.session.read().await.is_stress_testing);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stopstress_is_idempotent() {
    let ctx = default_context();
    dispatch(&ctx, "stopstress").await;

    assert!(output_contains(&ctx, "No stress test running").await);
    assert!(lines_of(&ctx, Severity::Error).await.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stopstress_halts_the_loop() {
    let ctx = default_context();
    dispatch(&ctx, "stress").await;
    tokio::time::sleep(Duration::from_millis(60)).await;
    dispatch(&ctx, "stopstress").await;

    assert!(output_contains(&ctx, "Stress test stopped").await);
    let sent = ctx.session.read().await.stress_stats.transactions_sent;
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(
        ctx.session.read().await.stress_stats.transactions_sent,
        sent,
        "loop kept sending after stopstress"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stressstats_reporting() {
    let ctx = default_context();

    dispatch(&ctx, "stressstats").await;
    assert!(output_contains(&ctx, "No stress test has been run").await);

    dispatch(&ctx, "stress").await;
    tokio::time::sleep(Duration::from_millis(60)).await;
    dispatch(&ctx, "stressstats").await;

    assert!(output_contains(&ctx, "transactions sent").await);
    assert!(output_contains(&ctx, "failure rate").await);
}

/// Mining and stress testing are independent: both can run at once.
#[tokio::test(flavor = "multi_thread")]
async fn test_mining_and_stress_run_concurrently() {
    let ctx = default_context();
    dispatch(&ctx, "connect").await;
    dispatch(&ctx, "mine").await;
    dispatch(&ctx, "stress").await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let session = ctx.session.read().await;
    assert!(session.is_mining);
    assert!(session.is_stress_testing);
    assert!(session.mine_count >= 1);
    assert!(session.stress_stats.transactions_sent >= 1);
}
