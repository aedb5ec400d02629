//! Minimal JSON-RPC client for the chain endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use super::ApiClient;
use crate::{olog_trace, Error, Result};

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Clone)]
pub struct RpcClient {
    api: ApiClient,
    url: String,
    next_id: Arc<AtomicU64>,
}

impl RpcClient {
    pub fn new(api: ApiClient, url: impl Into<String>) -> Self {
        Self {
            api,
            url: url.into(),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        olog_trace!("rpc request id={} method={}", id, method);
        let response: RpcResponse = self.api.post_json("rpc", &self.url, &body).await?;
        if let Some(err) = response.error {
            return Err(Error::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        response.result.ok_or(Error::Rpc {
            code: -1,
            message: "missing result".to_string(),
        })
    }

    /// `eth_chainId`, decoded from its hex form.
    pub async fn chain_id(&self) -> Result<u64> {
        let result = self.request("eth_chainId", json!([])).await?;
        decode_hex_quantity(&result)
    }

    /// `eth_getBalance` at the latest block, in wei.
    pub async fn get_balance(&self, address: &str) -> Result<u128> {
        let result = self
            .request("eth_getBalance", json!([address, "latest"]))
            .await?;
        decode_hex_quantity(&result).map(u128::from)
    }

    /// `eth_sendRawTransaction`. Returns the transaction hash without
    /// waiting for inclusion.
    pub async fn send_raw_transaction(&self, payload: &str) -> Result<String> {
        let result = self
            .request("eth_sendRawTransaction", json!([payload]))
            .await?;
        result.as_str().map(str::to_string).ok_or(Error::Rpc {
            code: -1,
            message: "transaction hash was not a string".to_string(),
        })
    }
}

fn decode_hex_quantity(value: &Value) -> Result<u64> {
    let s = value.as_str().ok_or(Error::Rpc {
        code: -1,
        message: format!("expected hex quantity, got {}", value),
    })?;
    let hex = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(hex, 16).map_err(|_| Error::Rpc {
        code: -1,
        message: format!("invalid hex quantity: {}", s),
    })
}
