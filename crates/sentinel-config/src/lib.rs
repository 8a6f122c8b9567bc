//! Shared configuration for the Sentinel dashboard and proxy.
//!
//! One TOML file with a `[dashboard]` and a `[proxy]` section, layered as
//! defaults, then the file, then `SENTINEL_*` environment variables.
//! Binaries apply their CLI flags on top of the loaded [`Config`].

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sentinel_core::{Configuration, CoreError, TransportConfig};

/// Upstream used by the proxy's `/api/players` route.
pub const DEFAULT_PLAYERS_UPSTREAM: &str = "http://sdo.stardeception.space/sdo/players";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by the TUI and the proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub dashboard: DashboardSettings,

    #[serde(default)]
    pub proxy: ProxySettings,
}

/// `[dashboard]`: what the settings form edits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DashboardSettings {
    /// Seconds between automatic refreshes.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u32,

    /// Upstream base URL. Empty disables polling.
    #[serde(default)]
    pub base_url: String,

    /// HTTP request timeout; 0 disables it.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            base_url: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

impl DashboardSettings {
    /// Validated controller configuration.
    pub fn to_configuration(&self) -> Result<Configuration, ConfigError> {
        Configuration::new(self.refresh_interval_secs, &self.base_url).map_err(|e| match e {
            CoreError::ValidationFailed { message } => ConfigError::Validation {
                field: "dashboard.refresh_interval_secs".into(),
                reason: message,
            },
            other => ConfigError::Validation {
                field: "dashboard".into(),
                reason: other.to_string(),
            },
        })
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default().with_timeout_secs(self.timeout_secs)
    }
}

/// `[proxy]`: listener and upstream for `sentinel-proxy`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxySettings {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_players_upstream")]
    pub players_upstream: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            players_upstream: default_players_upstream(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ProxySettings {
    /// Check that the players upstream is an absolute URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.players_upstream).map_err(|e| ConfigError::Validation {
            field: "proxy.players_upstream".into(),
            reason: format!("{e}: {}", self.players_upstream),
        })?;
        Ok(())
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default().with_timeout_secs(self.timeout_secs)
    }
}

fn default_refresh_interval() -> u32 {
    30
}
fn default_timeout() -> u64 {
    30
}
fn default_bind() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    3000
}
fn default_players_upstream() -> String {
    DEFAULT_PLAYERS_UPSTREAM.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("space", "stardeception", "sentinel").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("sentinel");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file just yields defaults.
///
/// Environment keys use `__` between section and field, e.g.
/// `SENTINEL_DASHBOARD__BASE_URL`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SENTINEL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}
