//! Stress-test loop: one synthetic transaction per iteration, fired
//! without waiting for on-chain confirmation.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::api::relayer::Relayer;
use crate::session::{Session, Severity};
use crate::wallet::{generate_session_address, TxKind, WalletProvider};
use crate::{olog_debug, olog_warn};

use super::LoopHandle;

pub const STRESS_INTERVAL: Duration = Duration::from_secs(2);

/// Warn once the failure rate crosses this threshold...
const FAILURE_WARN_RATE: f64 = 0.8;
/// ...but only after enough attempts that the rate means something.
const FAILURE_WARN_MIN_ATTEMPTS: u64 = 10;
/// Re-warn at most every this many sends.
const FAILURE_WARN_EVERY: u64 = 10;

pub struct StressLoop {
    session: Arc<RwLock<Session>>,
    provider: Arc<dyn WalletProvider>,
    relayer: Arc<dyn Relayer>,
    interval: Duration,
}

impl StressLoop {
    pub fn new(
        session: Arc<RwLock<Session>>,
        provider: Arc<dyn WalletProvider>,
        relayer: Arc<dyn Relayer>,
    ) -> Self {
        Self {
            session,
            provider,
            relayer,
            interval: STRESS_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn spawn(self) -> LoopHandle {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        olog_debug!("StressLoop::spawn interval={:?}", self.interval);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            // thread_rng is not Send; a seeded StdRng lives across awaits.
            let mut rng = StdRng::from_entropy();
            let mut stress_address: Option<String> = None;

            loop {
                tokio::select! {
                    _ = cancel_clone.cancelled() => {
                        olog_debug!("StressLoop cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        if !self.session.read().await.is_stress_testing {
                            olog_debug!("StressLoop: flag dropped, exiting");
                            break;
                        }

                        if stress_address.is_none() {
                            stress_address = Some(self.create_stress_wallet().await);
                        }
                        let address = stress_address.clone().unwrap_or_default();

                        self.iterate(&address, TxKind::random(&mut rng)).await;

                        if !self.session.read().await.is_stress_testing {
                            olog_debug!("StressLoop: flag dropped after iteration, exiting");
                            break;
                        }
                    }
                }
            }
        });

        LoopHandle::new(cancel)
    }

    /// Mint a throwaway wallet and ask the relayer to fund it. A funding
    /// failure is reported and the unfunded wallet is used anyway; the
    /// sends will fail and show up in the stats.
    async fn create_stress_wallet(&self) -> String {
        let address = generate_session_address();
        match self.relayer.fund_stress_wallet(&address).await {
            Ok(receipt) => {
                let mut session = self.session.write().await;
                session.record_stress_wallet();
                if receipt.funded {
                    session.log(
                        format!("Stress wallet {} funded by relayer.", short(&address)),
                        Severity::Info,
                    );
                } else {
                    session.log(
                        format!("Stress wallet {} created (relayer declined funding).", short(&address)),
                        Severity::Info,
                    );
                }
            }
            Err(e) => {
                olog_debug!("StressLoop: funding failed: {}", e);
                let mut session = self.session.write().await;
                session.record_stress_wallet();
                session.log(
                    format!("Stress wallet {} created (funding unavailable).", short(&address)),
                    Severity::Info,
                );
            }
        }
        address
    }

    /// One send attempt. The outcome only moves counters and status lines;
    /// nothing propagates, and the loop never stops itself.
    async fn iterate(&self, address: &str, kind: TxKind) {
        let result = self.provider.send_transaction(address, kind).await;

        let mut session = self.session.write().await;
        match result {
            Ok(tx_hash) => {
                session.record_stress_send(true);
                let n = session.stress_stats.transactions_sent;
                session.log(
                    format!("Stress tx #{} ({}) sent: {}", n, kind.as_str(), short(&tx_hash)),
                    Severity::Info,
                );
            }
            Err(e) => {
                olog_debug!("StressLoop: send failed: {}", e);
                session.record_stress_send(false);
                let n = session.stress_stats.transactions_sent;
                session.log(
                    format!("Stress tx #{} ({}) failed to send.", n, kind.as_str()),
                    Severity::Info,
                );
            }
        }

        let sent = session.stress_stats.transactions_sent;
        let rate = session.stress_stats.failure_rate();
        if sent > FAILURE_WARN_MIN_ATTEMPTS
            && rate > FAILURE_WARN_RATE
            && sent % FAILURE_WARN_EVERY == 0
        {
            let line = format!(
                "High failure rate: {:.0}% of {} sends failed. Stress test continues; use stopstress to stop.",
                rate * 100.0,
                sent
            );
            olog_warn!("{}", line);
            session.log(line, Severity::Warning);
        }
    }
}

fn short(s: &str) -> String {
    // Hashes are hex in practice, but the RPC response is untrusted input.
    if s.len() > 12 && s.is_ascii() {
        format!("{}...{}", &s[..6], &s[s.len() - 4..])
    } else {
        s.to_string()
    }
}
