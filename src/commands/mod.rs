//! Built-in command modules.
//!
//! Each module contributes one command family; `register_builtins` wires
//! them all into a registry at startup. Registration order matters only in
//! that the registry is last-write-wins.

pub mod ascii;
pub mod faucet;
pub mod help;
pub mod market;
pub mod media;
pub mod mining;
pub mod misc;
pub mod stress;
pub mod ui;
pub mod wallet;

use std::sync::Arc;

use crate::dispatch::CommandRegistry;

pub fn register_builtins(registry: &mut CommandRegistry) {
    registry.register(Arc::new(wallet::ConnectCommand));
    registry.register(Arc::new(wallet::DisconnectCommand));

    registry.register(Arc::new(mining::MineCommand));
    registry.register(Arc::new(mining::StopCommand));
    registry.register(Arc::new(mining::ClaimCommand));
    registry.register(Arc::new(faucet::FaucetCommand));

    registry.register(Arc::new(stress::StressCommand));
    registry.register(Arc::new(stress::StopStressCommand));
    registry.register(Arc::new(stress::StressStatsCommand));

    registry.register(Arc::new(market::PriceCommand));
    registry.register(Arc::new(market::EthCommand));
    registry.register(Arc::new(market::TvlCommand));
    registry.register(Arc::new(market::NewsCommand));
    registry.register(Arc::new(market::PerpCommand));

    registry.register(Arc::new(media::BluesCommand));
    registry.register(Arc::new(media::YoutubeCommand));

    registry.register(Arc::new(ascii::AsciiCommand));
    registry.register(Arc::new(ui::ThemeCommand));
    registry.register(Arc::new(ui::GuiCommand));
    registry.register(Arc::new(ui::ViewCommand));

    registry.register(Arc::new(misc::ClearCommand));
    registry.register(Arc::new(misc::RomeCommand));
    registry.register(Arc::new(help::HelpCommand));
}
