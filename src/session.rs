//! Terminal session state.
//!
//! One `Session` per running terminal: wallet binding, the mining and
//! stress-test flags with their counters, UI mode, and the severity-coded
//! output log. The two loop flags (`is_mining`, `is_stress_testing`) are
//! only ever written by the `begin_*`/`end_*` pairs below; loops and
//! commands go through those mutators so the single-instance invariant
//! holds in one place.

use chrono::{DateTime, Utc};

use crate::config::ViewMode;
use crate::wallet::WalletBinding;
use crate::{olog_debug, Error, Result};

/// Output log cap. Old lines are dropped from the front once exceeded.
const MAX_OUTPUT_LINES: usize = 2000;

/// Severity of a terminal output line. Drives color in the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
    /// Raw command output (ASCII art, API dumps) with no status connotation.
    Output,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Output => "output",
        }
    }
}

/// One rendered line of terminal output.
#[derive(Debug, Clone)]
pub struct OutputLine {
    pub content: String,
    pub kind: Severity,
    pub timestamp: DateTime<Utc>,
}

/// Counters for the stress-test loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StressStats {
    pub wallets_created: u64,
    pub transactions_sent: u64,
    pub successful_txs: u64,
    pub failed_txs: u64,
    pub start_time: Option<DateTime<Utc>>,
}

impl StressStats {
    /// Failure rate over all attempts, 0.0 when nothing was sent.
    pub fn failure_rate(&self) -> f64 {
        if self.transactions_sent == 0 {
            0.0
        } else {
            self.failed_txs as f64 / self.transactions_sent as f64
        }
    }
}

/// Panel toggles for the futuristic dashboard view. Rendering is out of
/// scope; the open/close commands only flip these flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct Panels {
    pub youtube_open: bool,
    pub news_open: bool,
    pub perp_open: bool,
}

/// State of the built-in blues jukebox.
#[derive(Debug, Clone, Copy)]
pub struct BluesPlayer {
    pub playing: bool,
    pub paused: bool,
    pub volume: u8,
}

impl Default for BluesPlayer {
    fn default() -> Self {
        Self {
            playing: false,
            paused: false,
            volume: 50,
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    pub wallet: Option<WalletBinding>,
    pub is_mining: bool,
    pub mine_count: u64,
    pub total_earned: f64,
    pub is_stress_testing: bool,
    pub stress_stats: StressStats,
    pub view_mode: ViewMode,
    pub theme: String,
    pub panels: Panels,
    pub blues: BluesPlayer,
    pub output: Vec<OutputLine>,
}

impl Session {
    pub fn new(view_mode: ViewMode, theme: String) -> Self {
        Self {
            view_mode,
            theme,
            ..Default::default()
        }
    }

    /// Append one line to the output log. Append-only, never fails.
    pub fn log(&mut self, content: impl Into<String>, kind: Severity) {
        self.output.push(OutputLine {
            content: content.into(),
            kind,
            timestamp: Utc::now(),
        });
        if self.output.len() > MAX_OUTPUT_LINES {
            let excess = self.output.len() - MAX_OUTPUT_LINES;
            self.output.drain(..excess);
        }
    }

    /// Replace the wallet binding wholesale.
    pub fn bind_wallet(&mut self, binding: WalletBinding) {
        olog_debug!(
            "Session::bind_wallet address={} kind={}",
            binding.short_address(),
            binding.kind
        );
        self.wallet = Some(binding);
    }

    /// Clear the wallet binding. Returns whether anything was bound; a
    /// no-op disconnect is informational, not an error.
    pub fn clear_wallet(&mut self) -> bool {
        olog_debug!("Session::clear_wallet bound={}", self.wallet.is_some());
        self.wallet.take().is_some()
    }

    /// Transition into mining. Requires a bound wallet and no loop already
    /// running. Resets the per-run counter on success.
    pub fn begin_mining(&mut self) -> Result<()> {
        if self.is_mining {
            return Err(Error::AlreadyRunning("Mining"));
        }
        if self.wallet.is_none() {
            return Err(Error::Wallet(
                "No wallet connected. Use connect first.".to_string(),
            ));
        }
        self.is_mining = true;
        self.mine_count = 0;
        olog_debug!("Session::begin_mining");
        Ok(())
    }

    /// Drop the mining flag. Idempotent; returns whether mining was active.
    pub fn end_mining(&mut self) -> bool {
        let was_active = self.is_mining;
        self.is_mining = false;
        olog_debug!("Session::end_mining was_active={}", was_active);
        was_active
    }

    /// One mining iteration's bookkeeping: the block counter always moves,
    /// the reward only lands when the relayer paid one out.
    pub fn record_mined_block(&mut self, reward: Option<f64>) {
        self.mine_count += 1;
        if let Some(amount) = reward {
            self.total_earned += amount;
        }
    }

    /// Transition into the stress test. Resets stats only on success, so a
    /// rejected second start leaves the running loop's counters alone.
    pub fn begin_stress(&mut self) -> Result<()> {
        if self.is_stress_testing {
            return Err(Error::AlreadyRunning("Stress test"));
        }
        self.is_stress_testing = true;
        self.stress_stats = StressStats {
            start_time: Some(Utc::now()),
            ..Default::default()
        };
        olog_debug!("Session::begin_stress");
        Ok(())
    }

    /// Drop the stress flag. Idempotent; returns whether the test was active.
    pub fn end_stress(&mut self) -> bool {
        let was_active = self.is_stress_testing;
        self.is_stress_testing = false;
        olog_debug!("Session::end_stress was_active={}", was_active);
        was_active
    }

    /// Record one stress-test send attempt.
    pub fn record_stress_send(&mut self, ok: bool) {
        self.stress_stats.transactions_sent += 1;
        if ok {
            self.stress_stats.successful_txs += 1;
        } else {
            self.stress_stats.failed_txs += 1;
        }
    }

    /// Record one throwaway wallet minted for the stress test.
    pub fn record_stress_wallet(&mut self) {
        self.stress_stats.wallets_created += 1;
    }
}
