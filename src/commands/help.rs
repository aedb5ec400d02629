//! The help command.

use async_trait::async_trait;

use crate::context::Context;
use crate::dispatch::Command;
use crate::session::Severity;
use crate::Result;

pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn usage(&self) -> &'static str {
        "help - list available commands"
    }

    async fn handle(&self, ctx: &Context, _args: &[String]) -> Result<()> {
        let commands = ctx.registry.sorted();
        let mut session = ctx.session.write().await;
        session.log(
            format!("{} commands available:", commands.len()),
            Severity::Output,
        );
        for command in commands {
            session.log(format!("  {}", command.usage()), Severity::Output);
        }
        Ok(())
    }
}
