//! Wallet commands: connect and disconnect.

use async_trait::async_trait;

use crate::context::Context;
use crate::dispatch::Command;
use crate::session::Severity;
use crate::wallet::{address_from_key, validate_private_key, WalletBinding, WalletKind};
use crate::{olog, Error, Result};

pub struct ConnectCommand;

#[async_trait]
impl Command for ConnectCommand {
    fn name(&self) -> &'static str {
        "connect"
    }

    fn usage(&self) -> &'static str {
        "connect [session|import <key>] - bind a wallet to this terminal"
    }

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()> {
        match args.first().map(String::as_str) {
            None | Some("session") => connect_session(ctx).await,
            Some("import") => import_key(ctx, args.get(1)).await,
            Some(other) => Err(Error::Usage(format!(
                "Unknown connect option '{}'. Usage: {}",
                other,
                self.usage()
            ))),
        }
    }
}

async fn connect_session(ctx: &Context) -> Result<()> {
    let binding = ctx.provider.connect().await?;
    olog!(
        "Wallet connected: {} (chain {})",
        binding.short_address(),
        binding.chain_id
    );

    let mut session = ctx.session.write().await;
    let replaced = session.wallet.is_some();
    let line = format!(
        "Connected {} wallet {} on chain {}.",
        binding.kind,
        binding.short_address(),
        binding.chain_id
    );
    session.bind_wallet(binding);
    session.log(line, Severity::Success);
    if replaced {
        session.log("Previous wallet binding replaced.", Severity::Info);
    }
    session.log(
        "Session wallets are throwaway keys. Do not store long-term funds.",
        Severity::Warning,
    );
    Ok(())
}

async fn import_key(ctx: &Context, key: Option<&String>) -> Result<()> {
    let key = key.ok_or_else(|| {
        Error::Usage("Please provide a private key: connect import <key>".to_string())
    })?;
    validate_private_key(key)?;

    let chain_id = ctx.rpc.chain_id().await.map_err(|e| {
        Error::Wallet(format!(
            "Could not verify the target chain ({}). Check your connection and rpc_url.",
            e
        ))
    })?;

    let binding = WalletBinding {
        address: address_from_key(key),
        chain_id,
        kind: WalletKind::Imported,
    };

    let mut session = ctx.session.write().await;
    let line = format!(
        "Imported wallet {} on chain {}.",
        binding.short_address(),
        chain_id
    );
    session.bind_wallet(binding);
    session.log(line, Severity::Success);
    Ok(())
}

pub struct DisconnectCommand;

#[async_trait]
impl Command for DisconnectCommand {
    fn name(&self) -> &'static str {
        "disconnect"
    }

    fn usage(&self) -> &'static str {
        "disconnect - clear the wallet binding"
    }

    async fn handle(&self, ctx: &Context, _args: &[String]) -> Result<()> {
        let mut session = ctx.session.write().await;
        if session.clear_wallet() {
            session.log("Wallet disconnected.", Severity::Success);
        } else {
            // No-op disconnect is informational, not an error.
            session.log("No wallet was connected.", Severity::Info);
        }
        Ok(())
    }
}
