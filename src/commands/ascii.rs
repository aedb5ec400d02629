//! ASCII art command.

use async_trait::async_trait;

use crate::context::Context;
use crate::dispatch::Command;
use crate::session::Severity;
use crate::{Error, Result};

pub const OMEGA_ART: &str = r#"
  ██████╗ ███╗   ███╗███████╗ ██████╗  █████╗
 ██╔═══██╗████╗ ████║██╔════╝██╔════╝ ██╔══██╗
 ██║   ██║██╔████╔██║█████╗  ██║  ███╗███████║
 ██║   ██║██║╚██╔╝██║██╔══╝  ██║   ██║██╔══██║
 ╚██████╔╝██║ ╚═╝ ██║███████╗╚██████╔╝██║  ██║
  ╚═════╝ ╚═╝     ╚═╝╚══════╝ ╚═════╝ ╚═╝  ╚═╝
"#;

const ROCKET_ART: &str = r#"
        /\
       /  \
      |    |
      | /\ |
      ||  ||
     /||  ||\
    /_||__||_\
       /\/\
      (    )
       \/\/
"#;

const MOON_ART: &str = r#"
        ___---___
     .--         --.
   ./   ()      .-. \.
  /   o    .   (   )  \
 / .            '-'    \
 | ()    .  O         . |
 |          o           |
  \    o     ()        /
   \.     .          ./
     --.         .--
        ---___---
"#;

const ARTS: &[(&str, &str)] = &[
    ("omega", OMEGA_ART),
    ("rocket", ROCKET_ART),
    ("moon", MOON_ART),
];

fn lookup(name: &str) -> Option<&'static str> {
    ARTS.iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, art)| *art)
}

fn available() -> String {
    ARTS.iter()
        .map(|(key, _)| *key)
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct AsciiCommand;

#[async_trait]
impl Command for AsciiCommand {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn usage(&self) -> &'static str {
        "ascii <name> - render a named ASCII art"
    }

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()> {
        let Some(name) = args.first() else {
            return Err(Error::Usage(format!(
                "Usage: ascii <name>. Available: {}",
                available()
            )));
        };

        let Some(art) = lookup(name) else {
            return Err(Error::Usage(format!(
                "Unknown art '{}'. Available: {}",
                name,
                available()
            )));
        };

        let mut session = ctx.session.write().await;
        for line in art.lines().skip_while(|l| l.is_empty()) {
            session.log(line.to_string(), Severity::Output);
        }
        Ok(())
    }
}
