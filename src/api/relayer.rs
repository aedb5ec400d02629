//! Relayer client: the off-chain service that submits mining rewards and
//! funds stress-test wallets so the user never sees a wallet popup.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::ApiClient;
use crate::Result;

/// Reward returned by a `/mine` call. `reward` is zero when the relayer
/// accepted the request but had nothing to pay out.
#[derive(Debug, Clone, Deserialize)]
pub struct MineReward {
    #[serde(default)]
    pub reward: f64,
    #[serde(default)]
    pub block: Option<u64>,
}

/// Receipt for a `/fund-stress-wallet` call.
#[derive(Debug, Clone, Deserialize)]
pub struct FundReceipt {
    #[serde(default)]
    pub funded: bool,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

/// The relayer seam. The mining and stress loops only know this trait, so
/// tests run against an in-memory implementation.
#[async_trait]
pub trait Relayer: Send + Sync {
    /// Request a mined-block reward for the given address.
    async fn mine(&self, address: &str) -> Result<MineReward>;

    /// Ask the relayer to seed a throwaway stress wallet with gas money.
    async fn fund_stress_wallet(&self, address: &str) -> Result<FundReceipt>;
}

/// Production relayer over HTTP.
pub struct HttpRelayer {
    api: ApiClient,
    base_url: String,
}

impl HttpRelayer {
    pub fn new(api: ApiClient, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { api, base_url }
    }
}

#[async_trait]
impl Relayer for HttpRelayer {
    async fn mine(&self, address: &str) -> Result<MineReward> {
        let url = format!("{}/mine", self.base_url);
        self.api
            .post_json("relayer", &url, &json!({ "address": address }))
            .await
    }

    async fn fund_stress_wallet(&self, address: &str) -> Result<FundReceipt> {
        let url = format!("{}/fund-stress-wallet", self.base_url);
        self.api
            .post_json("relayer", &url, &json!({ "address": address }))
            .await
    }
}
