//! Background loops for the terminal.
//!
//! Each loop is an independent tokio task bounded by its session flag and a
//! cancellation token. Loops mutate the session through its guarded
//! mutators and report through the session output log; a loop-body failure
//! never stops the loop. The only ways a loop ends: its flag drops, its
//! token cancels, or the process exits.

pub mod mining;
pub mod stress;

use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

pub use mining::MiningLoop;
pub use stress::StressLoop;

/// Handle to a running loop, used for cooperative shutdown.
pub struct LoopHandle {
    cancel: CancellationToken,
}

impl LoopHandle {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// Signal the loop to stop at its next iteration boundary.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Check if shutdown has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Owner of the at-most-one handle per loop kind. The session flags carry
/// the user-visible invariant; the handles exist so stop commands and
/// process teardown can cancel promptly instead of waiting out an interval.
#[derive(Default)]
pub struct LoopManager {
    mining: Mutex<Option<LoopHandle>>,
    stress: Mutex<Option<LoopHandle>>,
}

impl LoopManager {
    /// Store the mining handle, cancelling any stale predecessor.
    pub fn install_mining(&self, handle: LoopHandle) {
        if let Ok(mut slot) = self.mining.lock() {
            if let Some(old) = slot.replace(handle) {
                old.shutdown();
            }
        }
    }

    /// Cancel the mining loop if one is installed.
    pub fn cancel_mining(&self) -> bool {
        match self.mining.lock() {
            Ok(mut slot) => match slot.take() {
                Some(handle) => {
                    handle.shutdown();
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }

    /// Store the stress handle, cancelling any stale predecessor.
    pub fn install_stress(&self, handle: LoopHandle) {
        if let Ok(mut slot) = self.stress.lock() {
            if let Some(old) = slot.replace(handle) {
                old.shutdown();
            }
        }
    }

    /// Cancel the stress loop if one is installed.
    pub fn cancel_stress(&self) -> bool {
        match self.stress.lock() {
            Ok(mut slot) => match slot.take() {
                Some(handle) => {
                    handle.shutdown();
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }

    /// Cancel everything. Called on shutdown.
    pub fn shutdown_all(&self) {
        self.cancel_mining();
        self.cancel_stress();
    }
}
