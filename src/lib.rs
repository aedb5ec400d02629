pub mod api;
pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod log;
pub mod loops;
pub mod session;
pub mod wallet;

// Decoupled logic/render loop
pub mod app;
pub mod render;
pub mod ui;

pub use context::Context;
pub use error::{Error, Result};
pub use session::{OutputLine, Session, Severity};
