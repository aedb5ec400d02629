//! Appearance commands: theme, gui, view.
//!
//! Changes apply to the live session immediately and to the in-memory
//! config; the config file is written once at shutdown.

use async_trait::async_trait;

use crate::config::ViewMode;
use crate::context::Context;
use crate::dispatch::Command;
use crate::session::Severity;
use crate::{Error, Result};

pub const THEMES: &[&str] = &["dark", "light", "matrix", "amber", "midnight"];
const GUI_STYLES: &[&str] = &["classic", "neon", "minimal"];

pub struct ThemeCommand;

#[async_trait]
impl Command for ThemeCommand {
    fn name(&self) -> &'static str {
        "theme"
    }

    fn usage(&self) -> &'static str {
        "theme <name> - switch the color theme"
    }

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()> {
        let Some(name) = args.first() else {
            let current = ctx.session.read().await.theme.clone();
            ctx.session.write().await.log(
                format!("Current theme: {}. Available: {}", current, THEMES.join(", ")),
                Severity::Info,
            );
            return Ok(());
        };

        let name = name.to_lowercase();
        if !THEMES.contains(&name.as_str()) {
            return Err(Error::Usage(format!(
                "Unknown theme '{}'. Available: {}",
                name,
                THEMES.join(", ")
            )));
        }

        ctx.update_config(|c| c.theme = name.clone());
        let mut session = ctx.session.write().await;
        session.theme = name.clone();
        session.log(format!("Theme set to {}.", name), Severity::Success);
        Ok(())
    }
}

pub struct GuiCommand;

#[async_trait]
impl Command for GuiCommand {
    fn name(&self) -> &'static str {
        "gui"
    }

    fn usage(&self) -> &'static str {
        "gui <style> - switch the dashboard skin"
    }

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()> {
        let Some(style) = args.first() else {
            let current = ctx.config_snapshot().gui_style;
            ctx.session.write().await.log(
                format!(
                    "Current GUI style: {}. Available: {}",
                    current,
                    GUI_STYLES.join(", ")
                ),
                Severity::Info,
            );
            return Ok(());
        };

        let style = style.to_lowercase();
        if !GUI_STYLES.contains(&style.as_str()) {
            return Err(Error::Usage(format!(
                "Unknown GUI style '{}'. Available: {}",
                style,
                GUI_STYLES.join(", ")
            )));
        }

        ctx.update_config(|c| c.gui_style = style.clone());
        ctx.session
            .write()
            .await
            .log(format!("GUI style set to {}.", style), Severity::Success);
        Ok(())
    }
}

pub struct ViewCommand;

#[async_trait]
impl Command for ViewCommand {
    fn name(&self) -> &'static str {
        "view"
    }

    fn usage(&self) -> &'static str {
        "view <basic|futuristic> - switch the terminal layout"
    }

    async fn handle(&self, ctx: &Context, args: &[String]) -> Result<()> {
        let Some(raw) = args.first() else {
            let current = ctx.session.read().await.view_mode;
            ctx.session.write().await.log(
                format!("Current view mode: {}.", current),
                Severity::Info,
            );
            return Ok(());
        };

        let mode: ViewMode = raw.parse()?;
        ctx.update_config(|c| c.view_mode = mode);

        let mobile = ctx.config_snapshot().mobile_mode;
        let mut session = ctx.session.write().await;
        if mobile && mode == ViewMode::Futuristic {
            session.view_mode = ViewMode::Basic;
            session.log(
                "Mobile mode forces the basic view; preference saved for desktop.",
                Severity::Warning,
            );
        } else {
            session.view_mode = mode;
            session.log(format!("View mode set to {}.", mode), Severity::Success);
        }
        Ok(())
    }
}
