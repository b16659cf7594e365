//! Optional config file: desired zone and bootstrap URL overrides
//!
//! `<config-dir>/config.toml`:
//!
//! ```toml
//! zone = "America/Chicago"
//!
//! [bootstrap]
//! url = "https://example.com/set-timezone.sh"
//! ```
//!
//! CLI arguments win over the config file, which wins over the built-in
//! defaults. A missing file is not an error.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Built-in desired zone when neither CLI nor config names one
pub const DEFAULT_ZONE: &str = "America/Chicago";

/// Built-in bootstrap script location
pub const DEFAULT_URL: &str =
    "https://raw.githubusercontent.com/zonectl/zonectl/main/scripts/set-timezone.sh";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Desired time zone identifier
    #[serde(default)]
    pub zone: Option<String>,

    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BootstrapConfig {
    /// Script URL override
    #[serde(default)]
    pub url: Option<String>,
}

impl Config {
    /// Load `config.toml` from the config directory if present
    pub fn load() -> Result<Self> {
        let path = crate::paths::config_dir()?.join("config.toml");
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config at {}", path.display()))
    }

    /// Resolve the desired zone: CLI argument, then config, then default
    pub fn desired_zone(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.zone.clone())
            .unwrap_or_else(|| DEFAULT_ZONE.to_string())
    }

    /// Resolve the bootstrap URL: CLI argument, then config, then default
    pub fn bootstrap_url(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.bootstrap.url.clone())
            .unwrap_or_else(|| DEFAULT_URL.to_string())
    }
}
