//! Configuration file management.

use std::fs;
use std::path::PathBuf;

use airdash_types::MetricSelection;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// API base URL used when neither flag, env var, nor config provides one.
pub const DEFAULT_API_URL: &str = "http://localhost:5154";

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API base URL
    #[serde(default)]
    pub url: Option<String>,

    /// Default output format
    #[serde(default)]
    pub format: Option<String>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Request timeout in seconds
    #[serde(default)]
    pub timeout: Option<u64>,

    /// Bearer token from the last successful login
    #[serde(default)]
    pub token: Option<String>,

    /// Account email for login and notification subscription
    #[serde(default)]
    pub email: Option<String>,

    /// Default metric toggles for readings/series output
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Per-metric display toggles.
///
/// These are display defaults only; critical-event detection always covers
/// all five metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Show CO2 in readings/series output.
    #[serde(default = "default_true")]
    pub co2: bool,

    /// Show NH3 in readings/series output.
    #[serde(default = "default_true")]
    pub nh3: bool,

    /// Show benzene in readings/series output.
    #[serde(default = "default_true")]
    pub benzene: bool,

    /// Show LPG in readings/series output.
    #[serde(default = "default_true")]
    pub lpg: bool,

    /// Show CO in readings/series output.
    #[serde(default = "default_true")]
    pub co: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            co2: true,
            nh3: true,
            benzene: true,
            lpg: true,
            co: true,
        }
    }
}

impl MetricsConfig {
    /// Convert the toggles into a core metric selection.
    pub fn to_selection(&self) -> MetricSelection {
        MetricSelection {
            co2: self.co2,
            nh3: self.nh3,
            benzene: self.benzene,
            lpg: self.lpg,
            co: self.co,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("airdash")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Resolve the API URL: flag/env value first, then config, then default.
pub fn resolve_url(url: Option<String>, config: &Config) -> String {
    url.or_else(|| config.url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Resolve timeout: use provided value, fall back to config, then default
pub fn resolve_timeout(cmd_timeout: u64, config: &Config, default: u64) -> u64 {
    // If the command timeout differs from clap's default, use it
    // Otherwise, check config, then fall back to the provided default
    if cmd_timeout != default {
        cmd_timeout
    } else {
        config.timeout.unwrap_or(default)
    }
}

/// Store the bearer token (and optionally the email) after a login.
pub fn update_token(token: &str, email: Option<&str>) -> Result<()> {
    let mut config = Config::load();
    config.token = Some(token.to_string());
    if let Some(email) = email {
        config.email = Some(email.to_string());
    }
    config.save()
}
