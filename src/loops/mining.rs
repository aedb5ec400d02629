//! Mining loop: one relayer reward request per iteration.
//!
//! Policy: never halt on transient failure. Any relayer error reads as
//! "no reward this time" in the terminal; the real error goes to the
//! debug log so the two conditions stay distinguishable offline.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::api::relayer::Relayer;
use crate::olog_debug;
use crate::session::{Session, Severity};

use super::LoopHandle;

pub const MINE_INTERVAL: Duration = Duration::from_secs(15);

pub struct MiningLoop {
    session: Arc<RwLock<Session>>,
    relayer: Arc<dyn Relayer>,
    address: String,
    interval: Duration,
}

impl MiningLoop {
    pub fn new(
        session: Arc<RwLock<Session>>,
        relayer: Arc<dyn Relayer>,
        address: String,
    ) -> Self {
        Self {
            session,
            relayer,
            address,
            interval: MINE_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn spawn(self) -> LoopHandle {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        olog_debug!(
            "MiningLoop::spawn address={} interval={:?}",
            self.address,
            self.interval
        );

        tokio::spawn(async move {
            // First tick fires immediately, so the first block is mined on
            // start rather than one interval later.
            let mut ticker = tokio::time::interval(self.interval);

            loop {
                tokio::select! {
                    _ = cancel_clone.cancelled() => {
                        olog_debug!("MiningLoop cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        if !self.session.read().await.is_mining {
                            olog_debug!("MiningLoop: flag dropped, exiting");
                            break;
                        }

                        self.iterate().await;

                        // Re-check before waiting out the next interval.
                        if !self.session.read().await.is_mining {
                            olog_debug!("MiningLoop: flag dropped after iteration, exiting");
                            break;
                        }
                    }
                }
            }
        });

        LoopHandle::new(cancel)
    }

    /// One iteration. Errors are converted into a benign status line and
    /// never escape.
    async fn iterate(&self) {
        match self.relayer.mine(&self.address).await {
            Ok(reward) if reward.reward > 0.0 => {
                let mut session = self.session.write().await;
                session.record_mined_block(Some(reward.reward));
                let line = match reward.block {
                    Some(block) => format!(
                        "Block #{} mined! +{:.4} OMEGA (total {:.4})",
                        block, reward.reward, session.total_earned
                    ),
                    None => format!(
                        "Block mined! +{:.4} OMEGA (total {:.4})",
                        reward.reward, session.total_earned
                    ),
                };
                session.log(line, Severity::Success);
            }
            Ok(_) => {
                let mut session = self.session.write().await;
                session.record_mined_block(None);
                session.log("Block mined (no reward this time).", Severity::Info);
            }
            Err(e) => {
                olog_debug!("MiningLoop: relayer call failed: {}", e);
                let mut session = self.session.write().await;
                session.record_mined_block(None);
                session.log("Block mined (no reward this time).", Severity::Info);
            }
        }
    }
}
