//! The logic thread: input handling, command dispatch, state snapshots.
//!
//! Keyboard input and command execution live here, decoupled from the
//! render thread by the latest-wins state channel. Background loops share
//! the session behind its `RwLock` and show up in snapshots automatically.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tokio::runtime::Runtime;

use crate::commands;
use crate::config::Config;
use crate::context::Context;
use crate::dispatch::{dispatch, CommandRegistry};
use crate::render::RenderState;
use crate::session::Severity;
use crate::{olog, olog_debug, Result};

const TICK: Duration = Duration::from_millis(10);

pub struct LogicThread;

impl LogicThread {
    pub fn run(config: Config, state_tx: Sender<RenderState>, shutdown: Arc<AtomicBool>) -> Result<()> {
        Runtime::new()?.block_on(Self::run_async(config, state_tx, shutdown))
    }

    async fn run_async(
        config: Config,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        let mut registry = CommandRegistry::new();
        commands::register_builtins(&mut registry);
        olog_debug!("LogicThread: {} commands registered", registry.len());

        let ctx = Context::production(config, Arc::new(registry));
        welcome(&ctx).await;

        let mut input = String::new();

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Keyboard input (priority). Dispatch blocks further input until
            // the command completes, so commands run in submission order.
            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            shutdown.store(true, Ordering::Relaxed);
                        }
                        KeyCode::Char(c) => input.push(c),
                        KeyCode::Backspace => {
                            input.pop();
                        }
                        KeyCode::Enter => {
                            let line = std::mem::take(&mut input);
                            dispatch(&ctx, &line).await;
                        }
                        KeyCode::Esc => {
                            shutdown.store(true, Ordering::Relaxed);
                        }
                        _ => {}
                    }
                }
            }

            send_state(&state_tx, &ctx, &input).await;
            tokio::time::sleep(TICK).await;
        }

        olog!("LogicThread shutting down");
        ctx.loops.shutdown_all();
        {
            // Loops check their flags at iteration boundaries too.
            let mut session = ctx.session.write().await;
            session.end_mining();
            session.end_stress();
        }
        if let Err(e) = ctx.config_snapshot().save() {
            olog_debug!("Config save on shutdown failed: {}", e);
        }
        Ok(())
    }
}

async fn send_state(state_tx: &Sender<RenderState>, ctx: &Context, input: &str) {
    let state = RenderState::snapshot(&*ctx.session.read().await, input);
    let _ = state_tx.try_send(state);
}

async fn welcome(ctx: &Context) {
    let mut session = ctx.session.write().await;
    for line in crate::commands::ascii::OMEGA_ART.lines().skip(1) {
        session.log(line.to_string(), Severity::Output);
    }
    session.log(
        format!("Omega Terminal v{}", env!("CARGO_PKG_VERSION")),
        Severity::Info,
    );
    session.log(
        "Type help for commands. connect binds a wallet; mine starts earning.",
        Severity::Info,
    );
}
