//! Wallet kinds, bindings, and the provider seam.
//!
//! The terminal never touches key material beyond generating throwaway
//! session wallets. Anything that signs or sends goes through the
//! [`WalletProvider`] trait so the loops and commands can be exercised
//! offline in tests.

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::api::rpc::RpcClient;
use crate::{olog_debug, Error, Result};

/// How the bound wallet came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    /// Browser-extension style external provider.
    External,
    /// Ephemeral locally-generated keypair. Not for long-term funds.
    Session,
    /// Imported from a user-supplied private key.
    Imported,
}

impl std::fmt::Display for WalletKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletKind::External => write!(f, "external"),
            WalletKind::Session => write!(f, "session"),
            WalletKind::Imported => write!(f, "imported"),
        }
    }
}

/// The session's wallet binding. Replaced wholesale on connect/import,
/// cleared wholesale on disconnect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletBinding {
    pub address: String,
    pub chain_id: u64,
    pub kind: WalletKind,
}

impl WalletBinding {
    /// Shortened `0x1234...abcd` form for status lines.
    pub fn short_address(&self) -> String {
        if self.address.len() > 12 {
            format!(
                "{}...{}",
                &self.address[..6],
                &self.address[self.address.len() - 4..]
            )
        } else {
            self.address.clone()
        }
    }
}

/// Synthetic transaction shapes the stress loop rotates through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Transfer,
    SelfSend,
    ZeroValue,
    Burn,
}

impl TxKind {
    pub const ALL: [TxKind; 4] = [
        TxKind::Transfer,
        TxKind::SelfSend,
        TxKind::ZeroValue,
        TxKind::Burn,
    ];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Transfer => "transfer",
            TxKind::SelfSend => "self-send",
            TxKind::ZeroValue => "zero-value",
            TxKind::Burn => "burn",
        }
    }
}

/// Narrow interface to whatever can connect and send transactions.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Establish a connection and return the binding. Fails with
    /// `Error::Wallet` when no provider is available, the user rejects the
    /// prompt, or the provider cannot switch to the target chain.
    async fn connect(&self) -> Result<WalletBinding>;

    /// Fire one synthetic transaction, without waiting for confirmation.
    /// Returns the transaction hash reported by the send call.
    async fn send_transaction(&self, from: &str, kind: TxKind) -> Result<String>;
}

/// Production provider: session wallets signed locally, sends relayed
/// through the chain RPC endpoint.
pub struct RpcWalletProvider {
    rpc: RpcClient,
}

impl RpcWalletProvider {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl WalletProvider for RpcWalletProvider {
    async fn connect(&self) -> Result<WalletBinding> {
        let chain_id = self.rpc.chain_id().await.map_err(|e| {
            Error::Wallet(format!(
                "Could not reach the chain RPC endpoint ({}). Check your connection and rpc_url.",
                e
            ))
        })?;
        let address = generate_session_address();
        olog_debug!(
            "RpcWalletProvider::connect chain_id={} address={}",
            chain_id,
            address
        );
        Ok(WalletBinding {
            address,
            chain_id,
            kind: WalletKind::Session,
        })
    }

    async fn send_transaction(&self, from: &str, kind: TxKind) -> Result<String> {
        // Synthetic payload: the stress test measures send-path liveness,
        // not transaction semantics.
        let payload = format!("0x{}:{}", kind.as_str(), from);
        self.rpc.send_raw_transaction(&payload).await
    }
}

/// Generate a throwaway hex address for a session wallet.
pub fn generate_session_address() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 20] = rng.gen();
    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!("0x{}", hex)
}

/// Validate a user-supplied private key for `connect import`.
/// Accepts 64 hex chars with an optional 0x prefix.
pub fn validate_private_key(key: &str) -> Result<()> {
    let hex = key.strip_prefix("0x").unwrap_or(key);
    if hex.len() != 64 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::Wallet(
            "Invalid private key. Expected 64 hex characters.".to_string(),
        ));
    }
    Ok(())
}

/// Derive a display address from an imported key. Real derivation needs
/// wallet cryptography, which is out of scope; the terminal shows a
/// deterministic pseudo-address so imports are distinguishable.
pub fn address_from_key(key: &str) -> String {
    let hex = key.strip_prefix("0x").unwrap_or(key);
    format!("0x{}", &hex[..40.min(hex.len())])
}
