//! The terminal context: everything a command handler can reach.
//!
//! One explicit object instead of the ambient globals the browser build
//! hung off `window`. Created once at startup, cloned cheaply (all shared
//! pieces are behind `Arc`) into whatever needs it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::RwLock;

use crate::api::markets::MarketsClient;
use crate::api::relayer::{HttpRelayer, Relayer};
use crate::api::rpc::RpcClient;
use crate::api::ApiClient;
use crate::config::Config;
use crate::dispatch::CommandRegistry;
use crate::loops::{mining::MINE_INTERVAL, stress::STRESS_INTERVAL, LoopManager};
use crate::session::Session;
use crate::wallet::{RpcWalletProvider, WalletProvider};

#[derive(Clone)]
pub struct Context {
    pub session: Arc<RwLock<Session>>,
    /// In-memory preferences. Persisted once on shutdown, not per command,
    /// so command handlers stay side-effect free on the filesystem.
    pub config: Arc<Mutex<Config>>,
    pub registry: Arc<CommandRegistry>,
    pub rpc: RpcClient,
    pub relayer: Arc<dyn Relayer>,
    pub provider: Arc<dyn WalletProvider>,
    pub markets: MarketsClient,
    pub loops: Arc<LoopManager>,
    /// Loop intervals, overridable so tests do not wait out wall-clock
    /// mining delays.
    pub mine_interval: Duration,
    pub stress_interval: Duration,
}

impl Context {
    /// Wire up the production collaborators from config.
    pub fn production(config: Config, registry: Arc<CommandRegistry>) -> Self {
        let api = ApiClient::new();
        let rpc = RpcClient::new(api.clone(), config.effective_rpc_url());
        let relayer: Arc<dyn Relayer> =
            Arc::new(HttpRelayer::new(api.clone(), config.effective_relayer_url()));
        let provider: Arc<dyn WalletProvider> = Arc::new(RpcWalletProvider::new(rpc.clone()));
        let markets = MarketsClient::new(api);
        let session = Session::new(config.effective_view_mode(), config.theme.clone());

        Self {
            session: Arc::new(RwLock::new(session)),
            config: Arc::new(Mutex::new(config)),
            registry,
            rpc,
            relayer,
            provider,
            markets,
            loops: Arc::new(LoopManager::default()),
            mine_interval: MINE_INTERVAL,
            stress_interval: STRESS_INTERVAL,
        }
    }

    /// Assemble a context from explicit collaborators. Tests use this with
    /// mock relayer/provider implementations.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: Config,
        registry: Arc<CommandRegistry>,
        rpc: RpcClient,
        relayer: Arc<dyn Relayer>,
        provider: Arc<dyn WalletProvider>,
        markets: MarketsClient,
    ) -> Self {
        let session = Session::new(config.effective_view_mode(), config.theme.clone());
        Self {
            session: Arc::new(RwLock::new(session)),
            config: Arc::new(Mutex::new(config)),
            registry,
            rpc,
            relayer,
            provider,
            markets,
            loops: Arc::new(LoopManager::default()),
            mine_interval: MINE_INTERVAL,
            stress_interval: STRESS_INTERVAL,
        }
    }

    /// Snapshot the current preferences.
    pub fn config_snapshot(&self) -> Config {
        self.config
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Mutate the preferences in place.
    pub fn update_config<F: FnOnce(&mut Config)>(&self, f: F) {
        if let Ok(mut config) = self.config.lock() {
            f(&mut config);
        }
    }
}
