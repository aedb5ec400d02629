//! Shared fixtures: mock collaborators and a context builder.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use omega::api::markets::MarketsClient;
use omega::api::relayer::{FundReceipt, MineReward, Relayer};
use omega::api::rpc::RpcClient;
use omega::api::ApiClient;
use omega::commands::register_builtins;
use omega::config::Config;
use omega::dispatch::CommandRegistry;
use omega::wallet::{TxKind, WalletBinding, WalletKind, WalletProvider};
use omega::{Context, Error, Result, Severity};

/// In-memory relayer. Flip `fail` to simulate an unreachable service.
pub struct MockRelayer {
    pub reward: f64,
    pub fail: AtomicBool,
    pub mine_calls: AtomicU64,
    pub fund_calls: AtomicU64,
}

impl MockRelayer {
    pub fn new(reward: f64) -> Self {
        Self {
            reward,
            fail: AtomicBool::new(false),
            mine_calls: AtomicU64::new(0),
            fund_calls: AtomicU64::new(0),
        }
    }

    pub fn failing() -> Self {
        let relayer = Self::new(0.0);
        relayer.fail.store(true, Ordering::SeqCst);
        relayer
    }
}

#[async_trait]
impl Relayer for MockRelayer {
    async fn mine(&self, _address: &str) -> Result<MineReward> {
        let call = self.mine_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Api {
                service: "relayer",
                message: "connection refused".to_string(),
            });
        }
        Ok(MineReward {
            reward: self.reward,
            block: Some(1000 + call),
        })
    }

    async fn fund_stress_wallet(&self, _address: &str) -> Result<FundReceipt> {
        self.fund_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Api {
                service: "relayer",
                message: "connection refused".to_string(),
            });
        }
        Ok(FundReceipt {
            funded: true,
            tx_hash: Some("0xfund".to_string()),
        })
    }
}

pub const MOCK_ADDRESS: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const MOCK_CHAIN_ID: u64 = 1313161768;

/// In-memory wallet provider. Flip `fail_sends` to make every synthetic
/// transaction fail at the send call.
pub struct MockProvider {
    pub fail_sends: AtomicBool,
    pub sends: AtomicU64,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            fail_sends: AtomicBool::new(false),
            sends: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn connect(&self) -> Result<WalletBinding> {
        Ok(WalletBinding {
            address: MOCK_ADDRESS.to_string(),
            chain_id: MOCK_CHAIN_ID,
            kind: WalletKind::Session,
        })
    }

    async fn send_transaction(&self, _from: &str, _kind: TxKind) -> Result<String> {
        let n = self.sends.fetch_add(1, Ordering::SeqCst);
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(Error::Rpc {
                code: -32000,
                message: "nonce too low".to_string(),
            });
        }
        Ok(format!("0xtx{:08x}", n))
    }
}

/// Build a context wired to the given mocks, with loop intervals short
/// enough for tests. The RPC endpoint points at a closed local port; mocks
/// keep it unreached.
pub fn build_context(relayer: Arc<MockRelayer>, provider: Arc<MockProvider>) -> Context {
    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);

    let api = ApiClient::new();
    let rpc = RpcClient::new(api.clone(), "http://127.0.0.1:1");
    let markets = MarketsClient::new(api);

    let mut ctx = Context::new(
        Config::default(),
        Arc::new(registry),
        rpc,
        relayer,
        provider,
        markets,
    );
    ctx.mine_interval = Duration::from_millis(20);
    ctx.stress_interval = Duration::from_millis(10);
    ctx
}

/// Default context: paying relayer, healthy provider.
pub fn default_context() -> Context {
    build_context(Arc::new(MockRelayer::new(0.5)), Arc::new(MockProvider::new()))
}

/// All output lines of the given severity.
pub async fn lines_of(ctx: &Context, kind: Severity) -> Vec<String> {
    ctx.session
        .read()
        .await
        .output
        .iter()
        .filter(|l| l.kind == kind)
        .map(|l| l.content.clone())
        .collect()
}

/// Whether any output line contains the needle.
pub async fn output_contains(ctx: &Context, needle: &str) -> bool {
    ctx.session
        .read()
        .await
        .output
        .iter()
        .any(|l| l.content.contains(needle))
}
