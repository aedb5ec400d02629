//! Market-data commands: price, eth, tvl, news, perp.

use async_trait::async_trait;

use crate::context::Context;
use crate::dispatch::Command;
use crate::session::Severity;
use crate::{Error, Result};

const DEFAULT_COLLECTION_LIMIT: usize = 10;
const MAX_COLLECTION_LIMIT: usize = 50;
const NEWS_HEADLINES: usize = 5;

pub struct PriceCommand;

#[async_trait]
impl Command for PriceCommand {
    fn name(&self) -> &'static str {
        "price"
    }

    fn usage(&self) -> &'static str {
        "price <pair> - look up a trading pair on DexScreener"
    }

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()> {
        let query = args
            .first()
            .ok_or_else(|| Error::Usage("Usage: price <pair>  (e.g. price ETH/USDC)".to_string()))?;

        let pair = ctx.markets.pair_price(query).await?;
        let price = pair.price_usd.as_deref().unwrap_or("?");
        ctx.session.write().await.log(
            format!(
                "{}/{} on {}: ${}",
                pair.base_token.symbol, pair.quote_token.symbol, pair.dex_id, price
            ),
            Severity::Output,
        );
        Ok(())
    }
}

pub struct EthCommand;

#[async_trait]
impl Command for EthCommand {
    fn name(&self) -> &'static str {
        "eth"
    }

    fn usage(&self) -> &'static str {
        "eth collections [limit] - top Ethereum NFT collections"
    }

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()> {
        match args.first().map(String::as_str) {
            Some("collections") => {
                let limit = match args.get(1) {
                    Some(raw) => raw.parse::<usize>().map_err(|_| {
                        Error::Usage(format!("Invalid limit '{}'. Expected a number.", raw))
                    })?,
                    None => DEFAULT_COLLECTION_LIMIT,
                }
                .min(MAX_COLLECTION_LIMIT);

                let collections = ctx.markets.eth_collections(limit).await?;
                let mut session = ctx.session.write().await;
                if collections.is_empty() {
                    session.log("No collections returned.", Severity::Info);
                    return Ok(());
                }
                session.log(
                    format!("Top {} Ethereum collections:", collections.len()),
                    Severity::Output,
                );
                for (i, collection) in collections.iter().enumerate() {
                    let floor = collection
                        .floor_eth()
                        .map(|f| format!("{:.3} ETH", f))
                        .unwrap_or_else(|| "-".to_string());
                    session.log(
                        format!("  {:>2}. {:<32} floor {}", i + 1, collection.name, floor),
                        Severity::Output,
                    );
                }
                Ok(())
            }
            // Unknown subcommands fall through to the family's help text.
            _ => {
                ctx.session
                    .write()
                    .await
                    .log(format!("Usage: {}", self.usage()), Severity::Info);
                Ok(())
            }
        }
    }
}

pub struct TvlCommand;

#[async_trait]
impl Command for TvlCommand {
    fn name(&self) -> &'static str {
        "tvl"
    }

    fn usage(&self) -> &'static str {
        "tvl <protocol> - total value locked via DeFiLlama"
    }

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()> {
        let protocol = args
            .first()
            .ok_or_else(|| Error::Usage("Usage: tvl <protocol>  (e.g. tvl uniswap)".to_string()))?;

        let tvl = ctx.markets.protocol_tvl(protocol).await?;
        ctx.session.write().await.log(
            format!("{} TVL: ${:.0}", protocol, tvl),
            Severity::Output,
        );
        Ok(())
    }
}

pub struct NewsCommand;

#[async_trait]
impl Command for NewsCommand {
    fn name(&self) -> &'static str {
        "news"
    }

    fn usage(&self) -> &'static str {
        "news [open|close|latest] - crypto news panel and headlines"
    }

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()> {
        match args.first().map(String::as_str) {
            Some("open") => {
                let mut session = ctx.session.write().await;
                session.panels.news_open = true;
                session.log("News panel opened.", Severity::Info);
                Ok(())
            }
            Some("close") => {
                let mut session = ctx.session.write().await;
                session.panels.news_open = false;
                session.log("News panel closed.", Severity::Info);
                Ok(())
            }
            None | Some("latest") => {
                let headlines = ctx.markets.latest_news().await?;
                let mut session = ctx.session.write().await;
                if headlines.is_empty() {
                    session.log("No headlines right now.", Severity::Info);
                    return Ok(());
                }
                session.log("Latest headlines:", Severity::Output);
                for headline in headlines.iter().take(NEWS_HEADLINES) {
                    let source = headline
                        .source
                        .as_ref()
                        .map(|s| format!(" [{}]", s.title))
                        .unwrap_or_default();
                    session.log(format!("  - {}{}", headline.title, source), Severity::Output);
                }
                Ok(())
            }
            Some(_) => {
                ctx.session
                    .write()
                    .await
                    .log(format!("Usage: {}", self.usage()), Severity::Info);
                Ok(())
            }
        }
    }
}

pub struct PerpCommand;

#[async_trait]
impl Command for PerpCommand {
    fn name(&self) -> &'static str {
        "perp"
    }

    fn usage(&self) -> &'static str {
        "perp [open|close] - toggle the perps panel"
    }

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()> {
        let mut session = ctx.session.write().await;
        match args.first().map(String::as_str) {
            Some("open") | None => {
                session.panels.perp_open = true;
                session.log("Perps panel opened.", Severity::Info);
            }
            Some("close") => {
                session.panels.perp_open = false;
                session.log("Perps panel closed.", Severity::Info);
            }
            Some(_) => {
                session.log(format!("Usage: {}", self.usage()), Severity::Info);
            }
        }
        Ok(())
    }
}
