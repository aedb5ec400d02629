//! Immutable render snapshots passed from the logic thread to the render
//! thread over a bounded(1) latest-wins channel.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::ViewMode;
use crate::session::{OutputLine, Panels, Session};

/// How many output lines a snapshot carries. The renderer never shows more
/// than a screenful; shipping the whole log every frame would be waste.
const SNAPSHOT_TAIL: usize = 200;

static VERSION_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn next_version() -> u64 {
    VERSION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub struct RenderState {
    pub version: u64,
    pub lines: Vec<OutputLine>,
    pub input_buffer: String,
    /// Short wallet label for the status bar, None when disconnected.
    pub wallet: Option<String>,
    pub is_mining: bool,
    pub mine_count: u64,
    pub total_earned: f64,
    pub is_stress_testing: bool,
    pub stress_sent: u64,
    pub view_mode: ViewMode,
    pub theme: String,
    pub panels: Panels,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            version: 0,
            lines: Vec::new(),
            input_buffer: String::new(),
            wallet: None,
            is_mining: false,
            mine_count: 0,
            total_earned: 0.0,
            is_stress_testing: false,
            stress_sent: 0,
            view_mode: ViewMode::default(),
            theme: "dark".to_string(),
            panels: Panels::default(),
        }
    }
}

impl RenderState {
    /// Snapshot the session plus the live input buffer.
    pub fn snapshot(session: &Session, input_buffer: &str) -> Self {
        let start = session.output.len().saturating_sub(SNAPSHOT_TAIL);
        Self {
            version: next_version(),
            lines: session.output[start..].to_vec(),
            input_buffer: input_buffer.to_string(),
            wallet: session
                .wallet
                .as_ref()
                .map(|w| format!("{} ({})", w.short_address(), w.kind)),
            is_mining: session.is_mining,
            mine_count: session.mine_count,
            total_earned: session.total_earned,
            is_stress_testing: session.is_stress_testing,
            stress_sent: session.stress_stats.transactions_sent,
            view_mode: session.view_mode,
            theme: session.theme.clone(),
            panels: session.panels,
        }
    }
}
