//! Dispatcher and registry semantics: last-write-wins registration,
//! unknown-command handling, and failure recovery at the dispatch boundary.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use omega::api::markets::MarketsClient;
use omega::api::rpc::RpcClient;
use omega::api::ApiClient;
use omega::config::Config;
use omega::dispatch::{dispatch, Command, CommandRegistry};
use omega::{Context, Error, Result, Severity};

use crate::fixtures::{self, default_context, lines_of, output_contains};

struct CountingCommand {
    name: &'static str,
    hits: Arc<AtomicU64>,
}

#[async_trait]
impl Command for CountingCommand {
    fn name(&self) -> &'static str {
        self.name
    }

    fn usage(&self) -> &'static str {
        "counting test command"
    }

    async fn handle(&self, _ctx: &Context, _args: &[String]) -> Result<()> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FailingCommand;

#[async_trait]
impl Command for FailingCommand {
    fn name(&self) -> &'static str {
        "explode"
    }

    fn usage(&self) -> &'static str {
        "explode - always fails"
    }

    async fn handle(&self, _ctx: &Context, _args: &[String]) -> Result<()> {
        Err(Error::Usage("handler blew up".to_string()))
    }
}

fn context_with_registry(registry: CommandRegistry) -> Context {
    let api = ApiClient::new();
    let rpc = RpcClient::new(api.clone(), "http://127.0.0.1:1");
    let markets = MarketsClient::new(api);
    Context::new(
        Config::default(),
        Arc::new(registry),
        rpc,
        Arc::new(fixtures::MockRelayer::new(0.0)),
        Arc::new(fixtures::MockProvider::new()),
        markets,
    )
}

/// Registering two handlers under one name invokes only the latest.
#[tokio::test(flavor = "multi_thread")]
async fn test_registry_last_write_wins_on_dispatch() {
    let first_hits = Arc::new(AtomicU64::new(0));
    let second_hits = Arc::new(AtomicU64::new(0));

    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(CountingCommand {
        name: "dup",
        hits: first_hits.clone(),
    }));
    registry.register(Arc::new(CountingCommand {
        name: "dup",
        hits: second_hits.clone(),
    }));

    let ctx = context_with_registry(registry);
    dispatch(&ctx, "dup").await;

    assert_eq!(first_hits.load(Ordering::SeqCst), 0);
    assert_eq!(second_hits.load(Ordering::SeqCst), 1);
}

/// A handler failure becomes exactly one error line and the session keeps
/// dispatching afterwards.
#[tokio::test(flavor = "multi_thread")]
async fn test_dispatch_recovers_from_handler_failure() {
    let hits = Arc::new(AtomicU64::new(0));
    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(FailingCommand));
    registry.register(Arc::new(CountingCommand {
        name: "ok",
        hits: hits.clone(),
    }));

    let ctx = context_with_registry(registry);
    dispatch(&ctx, "explode").await;

    let errors = lines_of(&ctx, Severity::Error).await;
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("handler blew up"));

    // Subsequent commands still dispatch normally.
    dispatch(&ctx, "ok").await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(lines_of(&ctx, Severity::Error).await.len(), 1);
}

/// An unknown command appends exactly one error line and mutates no
/// session flags.
#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_command() {
    let ctx = default_context();
    dispatch(&ctx, "frobnicate now").await;

    let errors = lines_of(&ctx, Severity::Error).await;
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Unknown command"));

    let session = ctx.session.read().await;
    assert!(!session.is_mining);
    assert!(!session.is_stress_testing);
    assert!(session.wallet.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dispatch_is_case_insensitive() {
    let ctx = default_context();
    dispatch(&ctx, "HELP").await;
    assert!(output_contains(&ctx, "commands available").await);
    assert!(lines_of(&ctx, Severity::Error).await.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_line_is_a_noop() {
    let ctx = default_context();
    dispatch(&ctx, "").await;
    dispatch(&ctx, "   ").await;
    assert!(ctx.session.read().await.output.is_empty());
}

/// Every non-empty dispatch appends at least one line (the echo).
#[tokio::test(flavor = "multi_thread")]
async fn test_dispatch_always_echoes() {
    let ctx = default_context();
    dispatch(&ctx, "disconnect").await;
    let output = lines_of(&ctx, Severity::Output).await;
    assert!(output.iter().any(|l| l == "> disconnect"));
}
