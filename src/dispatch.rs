//! Command registry and dispatcher.
//!
//! The registry maps a command name (case-insensitive) to its handler.
//! Registration is last-write-wins: a later registration for the same name
//! silently replaces the earlier one, which is how later-loaded command
//! modules shadow built-ins. The replacement is logged at DEBUG.
//!
//! The dispatcher is the recovery boundary for foreground commands: a
//! handler error becomes one error-severity output line and nothing else.
//! `dispatch` itself never fails and the session keeps accepting commands.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::context::Context;
use crate::session::Severity;
use crate::{olog_debug, Result};

/// A terminal command. Implementations are pure functions of
/// `(context, args)` plus whatever effects they perform through the context.
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    /// One-line usage string for `help`.
    fn usage(&self) -> &'static str;

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()>;
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its lowercased name. Last write wins.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        let key = command.name().to_lowercase();
        if self.commands.insert(key.clone(), command).is_some() {
            olog_debug!("CommandRegistry: '{}' re-registered (last write wins)", key);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(&name.to_lowercase()).cloned()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered commands, sorted by name, for the help listing.
    pub fn sorted(&self) -> Vec<Arc<dyn Command>> {
        let mut all: Vec<_> = self.commands.values().cloned().collect();
        all.sort_by_key(|c| c.name());
        all
    }
}

/// Parse and execute one input line. Appends at least one output line for
/// any non-empty input; empty input is a no-op.
pub async fn dispatch(ctx: &Context, line: &str) {
    let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    let Some((name, args)) = tokens.split_first() else {
        return;
    };

    ctx.session
        .write()
        .await
        .log(format!("> {}", line.trim()), Severity::Output);

    let Some(command) = ctx.registry.get(name) else {
        olog_debug!("dispatch: unknown command '{}'", name);
        ctx.session.write().await.log(
            format!("Unknown command: {}. Type help for a list of commands.", name),
            Severity::Error,
        );
        return;
    };

    olog_debug!("dispatch: {} args={:?}", command.name(), args);
    if let Err(e) = command.handle(ctx, args).await {
        olog_debug!("dispatch: '{}' failed: {}", command.name(), e);
        ctx.session.write().await.log(e.to_string(), Severity::Error);
    }
}
