//! Stress-test commands: stress, stopstress, stressstats.

use async_trait::async_trait;
use chrono::Utc;

use crate::context::Context;
use crate::dispatch::Command;
use crate::loops::StressLoop;
use crate::session::Severity;
use crate::{olog, Error, Result};

pub struct StressCommand;

#[async_trait]
impl Command for StressCommand {
    fn name(&self) -> &'static str {
        "stress"
    }

    fn usage(&self) -> &'static str {
        "stress - start the network stress test (one tx every 2s)"
    }

    async fn handle(&self, ctx: &Context, _args: &[String]) -> Result<()> {
        {
            let mut session = ctx.session.write().await;
            match session.begin_stress() {
                Ok(()) => {}
                Err(Error::AlreadyRunning(_)) => {
                    session.log(
                        "Stress test already running. Use stopstress to stop.",
                        Severity::Warning,
                    );
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }

        let handle = StressLoop::new(
            ctx.session.clone(),
            ctx.provider.clone(),
            ctx.relayer.clone(),
        )
        .with_interval(ctx.stress_interval)
        .spawn();
        ctx.loops.install_stress(handle);

        olog!("Stress test started");
        ctx.session.write().await.log(
            "Stress test started. Sending synthetic transactions every 2 seconds; use stopstress to stop.",
            Severity::Success,
        );
        Ok(())
    }
}

pub struct StopStressCommand;

#[async_trait]
impl Command for StopStressCommand {
    fn name(&self) -> &'static str {
        "stopstress"
    }

    fn usage(&self) -> &'static str {
        "stopstress - stop the stress test"
    }

    async fn handle(&self, ctx: &Context, _args: &[String]) -> Result<()> {
        let mut session = ctx.session.write().await;
        let was_active = session.end_stress();
        ctx.loops.cancel_stress();

        if was_active {
            let stats = session.stress_stats.clone();
            olog!("Stress test stopped after {} sends", stats.transactions_sent);
            session.log(
                format!(
                    "Stress test stopped. {} sent, {} ok, {} failed.",
                    stats.transactions_sent, stats.successful_txs, stats.failed_txs
                ),
                Severity::Success,
            );
        } else {
            session.log("No stress test running.", Severity::Info);
        }
        Ok(())
    }
}

pub struct StressStatsCommand;

#[async_trait]
impl Command for StressStatsCommand {
    fn name(&self) -> &'static str {
        "stressstats"
    }

    fn usage(&self) -> &'static str {
        "stressstats - show stress test counters"
    }

    async fn handle(&self, ctx: &Context, _args: &[String]) -> Result<()> {
        let mut session = ctx.session.write().await;
        let stats = session.stress_stats.clone();

        if stats.start_time.is_none() {
            session.log("No stress test has been run this session.", Severity::Info);
            return Ok(());
        }

        let elapsed = stats
            .start_time
            .map(|t| (Utc::now() - t).num_seconds())
            .unwrap_or(0);

        session.log("Stress test stats:", Severity::Output);
        session.log(
            format!("  wallets created:   {}", stats.wallets_created),
            Severity::Output,
        );
        session.log(
            format!("  transactions sent: {}", stats.transactions_sent),
            Severity::Output,
        );
        session.log(
            format!("  successful:        {}", stats.successful_txs),
            Severity::Output,
        );
        session.log(
            format!("  failed:            {}", stats.failed_txs),
            Severity::Output,
        );
        session.log(
            format!(
                "  failure rate:      {:.0}%  (running for {}s)",
                stats.failure_rate() * 100.0,
                elapsed
            ),
            Severity::Output,
        );
        Ok(())
    }
}
