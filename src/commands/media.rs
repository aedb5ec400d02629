//! Entertainment commands: the blues jukebox and the youtube panel.
//!
//! Audio playback and embedded video are presentation concerns; these
//! handlers only keep the session flags coherent and validate arguments.

use async_trait::async_trait;

use crate::context::Context;
use crate::dispatch::Command;
use crate::session::Severity;
use crate::{Error, Result};

pub struct BluesCommand;

#[async_trait]
impl Command for BluesCommand {
    fn name(&self) -> &'static str {
        "blues"
    }

    fn usage(&self) -> &'static str {
        "blues [play|stop|pause|volume N|help] - the terminal jukebox"
    }

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()> {
        let mut session = ctx.session.write().await;
        match args.first().map(String::as_str) {
            None | Some("play") => {
                session.blues.playing = true;
                session.blues.paused = false;
                session.log("Blues playing. B.B. would approve.", Severity::Success);
            }
            Some("stop") => {
                session.blues.playing = false;
                session.blues.paused = false;
                session.log("Blues stopped.", Severity::Info);
            }
            Some("pause") => {
                if session.blues.playing {
                    session.blues.paused = true;
                    session.log("Blues paused.", Severity::Info);
                } else {
                    session.log("Nothing is playing.", Severity::Info);
                }
            }
            Some("volume") => {
                let Some(raw) = args.get(1) else {
                    // Missing argument aborts before any side effect.
                    return Err(Error::Usage(
                        "Please provide a volume level (0-100)".to_string(),
                    ));
                };
                let level: u8 = raw.parse().map_err(|_| {
                    Error::Usage(format!("Invalid volume '{}'. Expected 0-100.", raw))
                })?;
                if level > 100 {
                    return Err(Error::Usage(format!(
                        "Volume {} out of range. Expected 0-100.",
                        level
                    )));
                }
                session.blues.volume = level;
                session.log(format!("Volume set to {}.", level), Severity::Success);
            }
            Some("help") | Some(_) => {
                session.log(format!("Usage: {}", self.usage()), Severity::Info);
            }
        }
        Ok(())
    }
}

pub struct YoutubeCommand;

#[async_trait]
impl Command for YoutubeCommand {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn usage(&self) -> &'static str {
        "youtube [open|close|search <q>|play <id>] - the video panel"
    }

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()> {
        let mut session = ctx.session.write().await;
        match args.first().map(String::as_str) {
            Some("open") | None => {
                session.panels.youtube_open = true;
                session.log("YouTube panel opened.", Severity::Info);
            }
            Some("close") => {
                session.panels.youtube_open = false;
                session.log("YouTube panel closed.", Severity::Info);
            }
            Some("search") => {
                let query = args[1..].join(" ");
                if query.is_empty() {
                    return Err(Error::Usage("Usage: youtube search <query>".to_string()));
                }
                session.panels.youtube_open = true;
                session.log(format!("Searching YouTube for '{}'...", query), Severity::Info);
            }
            Some("play") => {
                let Some(id) = args.get(1) else {
                    return Err(Error::Usage("Usage: youtube play <video id>".to_string()));
                };
                session.panels.youtube_open = true;
                session.log(format!("Playing video {}.", id), Severity::Info);
            }
            Some(_) => {
                session.log(format!("Usage: {}", self.usage()), Severity::Info);
            }
        }
        Ok(())
    }
}
