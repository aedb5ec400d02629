//! Faucet command: relayer-funded gas drips and balance status.

use async_trait::async_trait;

use crate::context::Context;
use crate::dispatch::Command;
use crate::session::Severity;
use crate::{Error, Result};

/// Wei per whole OMEGA, for the status display.
const WEI_PER_OMEGA: f64 = 1e18;

pub struct FaucetCommand;

#[async_trait]
impl Command for FaucetCommand {
    fn name(&self) -> &'static str {
        "faucet"
    }

    fn usage(&self) -> &'static str {
        "faucet [status] - request a gas drip, or show wallet balance"
    }

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()> {
        let wallet = ctx.session.read().await.wallet.clone();
        let Some(wallet) = wallet else {
            return Err(Error::Wallet(
                "No wallet connected. Use connect first.".to_string(),
            ));
        };

        match args.first().map(String::as_str) {
            Some("status") => {
                let wei = ctx.rpc.get_balance(&wallet.address).await?;
                let omega = wei as f64 / WEI_PER_OMEGA;
                ctx.session.write().await.log(
                    format!("Balance of {}: {:.6} OMEGA", wallet.short_address(), omega),
                    Severity::Output,
                );
            }
            None => {
                let receipt = ctx.relayer.fund_stress_wallet(&wallet.address).await?;
                let mut session = ctx.session.write().await;
                if receipt.funded {
                    let line = match receipt.tx_hash {
                        Some(hash) => format!("Faucet drip sent to {} ({}).", wallet.short_address(), hash),
                        None => format!("Faucet drip sent to {}.", wallet.short_address()),
                    };
                    session.log(line, Severity::Success);
                } else {
                    session.log(
                        "Faucet declined the request. Try again later.",
                        Severity::Warning,
                    );
                }
            }
            Some(other) => {
                return Err(Error::Usage(format!(
                    "Unknown faucet option '{}'. Usage: {}",
                    other,
                    self.usage()
                )));
            }
        }
        Ok(())
    }
}
