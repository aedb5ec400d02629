//! Market-data clients: DexScreener pair lookups, Magic Eden collections,
//! DeFiLlama TVL, and crypto news headlines. Each endpoint keeps its own
//! response shape; only the error type is shared.

use serde::Deserialize;

use super::ApiClient;
use crate::{Error, Result};

const DEXSCREENER_URL: &str = "https://api.dexscreener.com/latest/dex/search";
const MAGIC_EDEN_URL: &str = "https://api-mainnet.magiceden.dev/v3/rtp/ethereum/collections/v7";
const DEFILLAMA_URL: &str = "https://api.llama.fi/tvl";
const NEWS_URL: &str = "https://cryptopanic.com/api/v1/posts/?public=true";

#[derive(Debug, Deserialize)]
struct DexSearchResponse {
    #[serde(default)]
    pairs: Vec<DexPair>,
}

/// One DexScreener trading pair.
#[derive(Debug, Clone, Deserialize)]
pub struct DexPair {
    #[serde(rename = "baseToken")]
    pub base_token: DexToken,
    #[serde(rename = "quoteToken")]
    pub quote_token: DexToken,
    #[serde(rename = "priceUsd", default)]
    pub price_usd: Option<String>,
    #[serde(rename = "dexId", default)]
    pub dex_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexToken {
    #[serde(default)]
    pub symbol: String,
}

#[derive(Debug, Deserialize)]
struct MagicEdenResponse {
    #[serde(default)]
    collections: Vec<EthCollection>,
}

/// One Magic Eden Ethereum collection row.
#[derive(Debug, Clone, Deserialize)]
pub struct EthCollection {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "floorAsk", default)]
    pub floor_ask: Option<FloorAsk>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FloorAsk {
    #[serde(default)]
    pub price: Option<FloorPrice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FloorPrice {
    #[serde(default)]
    pub amount: Option<FloorAmount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FloorAmount {
    #[serde(default)]
    pub decimal: Option<f64>,
}

impl EthCollection {
    pub fn floor_eth(&self) -> Option<f64> {
        self.floor_ask
            .as_ref()?
            .price
            .as_ref()?
            .amount
            .as_ref()?
            .decimal
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    results: Vec<Headline>,
}

/// One news headline.
#[derive(Debug, Clone, Deserialize)]
pub struct Headline {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: Option<NewsSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsSource {
    #[serde(default)]
    pub title: String,
}

/// Aggregated client for the read-only market APIs.
#[derive(Debug, Clone)]
pub struct MarketsClient {
    api: ApiClient,
}

impl MarketsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Best DexScreener match for a pair query like `ETH/USDC`.
    pub async fn pair_price(&self, query: &str) -> Result<DexPair> {
        let url = format!("{}?q={}", DEXSCREENER_URL, query);
        let response: DexSearchResponse = self.api.get_json("dexscreener", &url).await?;
        response.pairs.into_iter().next().ok_or(Error::Api {
            service: "dexscreener",
            message: format!("no pairs found for '{}'", query),
        })
    }

    /// Top Ethereum NFT collections by Magic Eden's default ranking.
    pub async fn eth_collections(&self, limit: usize) -> Result<Vec<EthCollection>> {
        let url = format!("{}?limit={}", MAGIC_EDEN_URL, limit);
        let response: MagicEdenResponse = self.api.get_json("magiceden", &url).await?;
        Ok(response.collections)
    }

    /// Current TVL in USD for a DeFiLlama protocol slug.
    pub async fn protocol_tvl(&self, protocol: &str) -> Result<f64> {
        let url = format!("{}/{}", DEFILLAMA_URL, protocol);
        self.api.get_json("defillama", &url).await
    }

    /// Latest crypto news headlines.
    pub async fn latest_news(&self) -> Result<Vec<Headline>> {
        let response: NewsResponse = self.api.get_json("news", NEWS_URL).await?;
        Ok(response.results)
    }
}
