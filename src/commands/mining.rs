//! Mining commands: mine, stop, claim.

use async_trait::async_trait;

use crate::context::Context;
use crate::dispatch::Command;
use crate::loops::MiningLoop;
use crate::session::Severity;
use crate::{olog, Error, Result};

pub struct MineCommand;

#[async_trait]
impl Command for MineCommand {
    fn name(&self) -> &'static str {
        "mine"
    }

    fn usage(&self) -> &'static str {
        "mine - start the mining loop (one block every 15s)"
    }

    async fn handle(&self, ctx: &Context, _args: &[String]) -> Result<()> {
        let address = {
            let mut session = ctx.session.write().await;
            match session.begin_mining() {
                Ok(()) => session
                    .wallet
                    .as_ref()
                    .map(|w| w.address.clone())
                    .unwrap_or_default(),
                Err(Error::AlreadyRunning(_)) => {
                    session.log("Mining already running. Use stop to stop.", Severity::Warning);
                    return Ok(());
                }
                // Wallet errors surface at the dispatch boundary.
                Err(e) => return Err(e),
            }
        };

        let handle = MiningLoop::new(ctx.session.clone(), ctx.relayer.clone(), address)
            .with_interval(ctx.mine_interval)
            .spawn();
        ctx.loops.install_mining(handle);

        olog!("Mining started");
        ctx.session.write().await.log(
            "Mining started. One block every 15 seconds; use stop to stop.",
            Severity::Success,
        );
        Ok(())
    }
}

pub struct StopCommand;

#[async_trait]
impl Command for StopCommand {
    fn name(&self) -> &'static str {
        "stop"
    }

    fn usage(&self) -> &'static str {
        "stop - stop the mining loop"
    }

    async fn handle(&self, ctx: &Context, _args: &[String]) -> Result<()> {
        let mut session = ctx.session.write().await;
        let was_active = session.end_mining();
        ctx.loops.cancel_mining();

        if was_active {
            let line = format!(
                "Mining stopped. {} blocks mined, {:.4} OMEGA earned.",
                session.mine_count, session.total_earned
            );
            olog!("Mining stopped after {} blocks", session.mine_count);
            session.log(line, Severity::Success);
        } else {
            session.log("No mining activity running.", Severity::Info);
        }
        Ok(())
    }
}

pub struct ClaimCommand;

#[async_trait]
impl Command for ClaimCommand {
    fn name(&self) -> &'static str {
        "claim"
    }

    fn usage(&self) -> &'static str {
        "claim - claim accumulated mining rewards"
    }

    async fn handle(&self, ctx: &Context, _args: &[String]) -> Result<()> {
        let mut session = ctx.session.write().await;
        let Some(wallet) = session.wallet.clone() else {
            return Err(Error::Wallet(
                "No wallet connected. Use connect first.".to_string(),
            ));
        };

        if session.total_earned <= 0.0 {
            session.log("Nothing to claim yet. Mine some blocks first.", Severity::Info);
            return Ok(());
        }

        let amount = session.total_earned;
        session.total_earned = 0.0;
        olog!("Claimed {:.4} OMEGA to {}", amount, wallet.short_address());
        session.log(
            format!("Claimed {:.4} OMEGA to {}.", amount, wallet.short_address()),
            Severity::Success,
        );
        Ok(())
    }
}
