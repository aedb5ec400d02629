//! Mining loop lifecycle: start guards, resilience to relayer failures,
//! and idempotent stop.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use omega::dispatch::dispatch;
use omega::Severity;

use crate::fixtures::{build_context, default_context, lines_of, output_contains, MockProvider, MockRelayer};

/// `mine` with no wallet bound fails with a remediation hint and never
/// starts the loop.
#[tokio::test(flavor = "multi_thread")]
async fn test_mine_without_wallet() {
    let relayer = Arc::new(MockRelayer::new(0.5));
    let ctx = build_context(relayer.clone(), Arc::new(MockProvider::new()));

    dispatch(&ctx, "mine").await;

    let errors = lines_of(&ctx, Severity::Error).await;
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("No wallet connected"));
    assert!(errors[0].contains("connect first"));
    assert!(!ctx.session.read().await.is_mining);

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(relayer.mine_calls.load(Ordering::SeqCst), 0);
}

/// A second `mine` reports "already running" without resetting the counter
/// or scheduling a second loop.
#[tokio::test(flavor = "multi_thread")]
async fn test_second_mine_does_not_reset_or_double() {
    let mut ctx = default_context();
    // Long interval: exactly one iteration (the immediate first tick) runs
    // during this test, so the counter is deterministic.
    ctx.mine_interval = Duration::from_secs(30);

    dispatch(&ctx, "connect").await;
    dispatch(&ctx, "mine").await;
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(ctx.session.read().await.mine_count, 1);

    dispatch(&ctx, "mine").await;
    assert!(output_contains(&ctx, "Mining already running").await);

    // A second loop would fire its own immediate first tick.
    tokio::time::sleep(Duration::from_millis(80)).await;
    let session = ctx.session.read().await;
    assert_eq!(session.mine_count, 1);
    assert!(session.is_mining);
}

/// Relayer failures still increment the counter, still reschedule, and
/// never surface as error lines.
#[tokio::test(flavor = "multi_thread")]
async fn test_mining_survives_relayer_failures() {
    let relayer = Arc::new(MockRelayer::failing());
    let ctx = build_context(relayer.clone(), Arc::new(MockProvider::new()));

    dispatch(&ctx, "connect").await;
    dispatch(&ctx, "mine").await;
    tokio::time::sleep(Duration::from_millis(110)).await;

    let session = ctx.session.read().await;
    assert!(session.mine_count >= 2, "loop should keep rescheduling");
    assert!(session.is_mining);
    assert_eq!(session.total_earned, 0.0);
    drop(session);

    assert!(relayer.mine_calls.load(Ordering::SeqCst) >= 2);
    assert!(output_contains(&ctx, "no reward this time").await);
    // The failure is swallowed, not reported as an error.
    let errors = lines_of(&ctx, Severity::Error).await;
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
}

/// Successful iterations accumulate rewards.
#[tokio::test(flavor = "multi_thread")]
async fn test_mining_accumulates_rewards() {
    let relayer = Arc::new(MockRelayer::new(0.25));
    let ctx = build_context(relayer, Arc::new(MockProvider::new()));

    dispatch(&ctx, "connect").await;
    dispatch(&ctx, "mine").await;
    tokio::time::sleep(Duration::from_millis(110)).await;

    let session = ctx.session.read().await;
    assert!(session.mine_count >= 2);
    let expected = session.mine_count as f64 * 0.25;
    assert!((session.total_earned - expected).abs() < 1e-9);
    drop(session);

    assert!(output_contains(&ctx, "Block #").await);
}

/// `stop` with nothing running is informational, not an error.
#[tokio::test(flavor = "multi_thread")]
async fn test_stop_is_idempotent() {
    let ctx = default_context();
    dispatch(&ctx, "stop").await;

    assert!(output_contains(&ctx, "No mining activity running").await);
    assert!(lines_of(&ctx, Severity::Error).await.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stop_halts_the_loop() {
    let ctx = default_context();
    dispatch(&ctx, "connect").await;
    dispatch(&ctx, "mine").await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    dispatch(&ctx, "stop").await;

    assert!(output_contains(&ctx, "Mining stopped").await);
    assert!(!ctx.session.read().await.is_mining);

    let count = ctx.session.read().await.mine_count;
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(ctx.session.read().await.mine_count, count, "loop kept running after stop");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_claim_lifecycle() {
    let ctx = default_context();

    dispatch(&ctx, "claim").await;
    assert!(output_contains(&ctx, "No wallet connected").await);

    dispatch(&ctx, "connect").await;
    dispatch(&ctx, "claim").await;
    assert!(output_contains(&ctx, "Nothing to claim yet").await);

    ctx.session.write().await.total_earned = 5.0;
    dispatch(&ctx, "claim").await;
    assert!(output_contains(&ctx, "Claimed 5.0000 OMEGA").await);
    assert_eq!(ctx.session.read().await.total_earned, 0.0);
}
