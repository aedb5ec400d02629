use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::{olog_debug, Error, Result};

pub const DEFAULT_RPC_URL: &str = "https://0x4e454228.rpc.aurora-cloud.dev";
pub const DEFAULT_RELAYER_URL: &str = "https://relayer.omega.zone";

/// Terminal layout: plain scrolling terminal, or the dashboard with side panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Basic,
    #[default]
    Futuristic,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Basic => write!(f, "basic"),
            ViewMode::Futuristic => write!(f, "futuristic"),
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(ViewMode::Basic),
            "futuristic" => Ok(ViewMode::Futuristic),
            other => Err(Error::Usage(format!(
                "Unknown view mode '{}'. Use basic or futuristic.",
                other
            ))),
        }
    }
}

/// Persisted user preferences. One TOML document under ~/.omega, where the
/// browser build kept a pile of individual localStorage keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default = "default_gui_style")]
    pub gui_style: String,
    #[serde(default = "default_palette")]
    pub color_palette: String,
    #[serde(default)]
    pub ai_mode: bool,
    /// Forces basic view regardless of the stored view mode.
    #[serde(default)]
    pub mobile_mode: bool,
    #[serde(default = "default_true")]
    pub sound_effects: bool,
    pub rpc_url: Option<String>,
    pub relayer_url: Option<String>,
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_gui_style() -> String {
    "classic".to_string()
}

fn default_palette() -> String {
    "green".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            view_mode: ViewMode::default(),
            gui_style: default_gui_style(),
            color_palette: default_palette(),
            ai_mode: false,
            mobile_mode: false,
            sound_effects: true,
            rpc_url: None,
            relayer_url: None,
        }
    }
}

impl Config {
    pub fn omega_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".omega"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::omega_dir()?.join("omega.toml"))
    }

    pub fn effective_rpc_url(&self) -> &str {
        self.rpc_url.as_deref().unwrap_or(DEFAULT_RPC_URL)
    }

    pub fn effective_relayer_url(&self) -> &str {
        self.relayer_url.as_deref().unwrap_or(DEFAULT_RELAYER_URL)
    }

    /// View mode after the mobile override is applied.
    pub fn effective_view_mode(&self) -> ViewMode {
        if self.mobile_mode {
            ViewMode::Basic
        } else {
            self.view_mode
        }
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        olog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            olog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(&path)?)?;
        olog_debug!(
            "Config loaded: theme={} view={} gui={}",
            config.theme,
            config.view_mode,
            config.gui_style
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let omega_dir = Self::omega_dir()?;
        if !omega_dir.exists() {
            fs::create_dir_all(&omega_dir)?;
        }
        let path = Self::config_path()?;
        fs::write(&path, toml::to_string_pretty(self)?)?;
        olog_debug!("Config saved to {}", path.display());
        Ok(())
    }
}
