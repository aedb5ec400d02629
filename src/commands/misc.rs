//! Odds and ends: clear and the rome easter egg.

use async_trait::async_trait;

use crate::context::Context;
use crate::dispatch::Command;
use crate::session::Severity;
use crate::Result;

pub struct ClearCommand;

#[async_trait]
impl Command for ClearCommand {
    fn name(&self) -> &'static str {
        "clear"
    }

    fn usage(&self) -> &'static str {
        "clear - wipe the terminal output"
    }

    async fn handle(&self, ctx: &Context, _args: &[String]) -> Result<()> {
        let mut session = ctx.session.write().await;
        session.output.clear();
        session.log("Terminal cleared.", Severity::Info);
        Ok(())
    }
}

pub struct RomeCommand;

#[async_trait]
impl Command for RomeCommand {
    fn name(&self) -> &'static str {
        "rome"
    }

    fn usage(&self) -> &'static str {
        "rome <status|decree> - consult the empire"
    }

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()> {
        let mut session = ctx.session.write().await;
        match args.first().map(String::as_str) {
            Some("status") => {
                let blocks = session.mine_count;
                session.log("The empire stands.", Severity::Output);
                session.log(
                    format!("Legions have mined {} blocks this campaign.", blocks),
                    Severity::Output,
                );
            }
            Some("decree") => {
                session.log(
                    "By decree of the senate: keep mining, citizen.",
                    Severity::Output,
                );
            }
            // Unknown subcommands fall through to the family's help text.
            _ => {
                session.log(format!("Usage: {}", self.usage()), Severity::Info);
            }
        }
        Ok(())
    }
}
