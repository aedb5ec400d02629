//! Integration test suite for the Omega terminal.
//!
//! These tests exercise the dispatcher, the session state machine, and the
//! background loops end to end. They verify that the pieces work together:
//! commands route correctly, failures never escape the dispatch or loop
//! boundaries, and the single-instance invariants hold.
//!
//! # Test Categories
//!
//! - `dispatch`: registry semantics and dispatcher failure recovery
//! - `mining`: mining loop lifecycle and resilience
//! - `stress`: stress-test loop lifecycle and failure-rate reporting
//! - `commands`: wallet, media, appearance, and art commands
//!
//! # CI Compatibility
//!
//! All external collaborators (relayer, wallet provider) are in-memory
//! mocks; no test makes a network call.

mod fixtures;

mod dispatch;
mod mining;
mod stress;
