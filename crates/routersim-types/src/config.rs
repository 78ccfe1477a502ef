//! Router configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! router with the stock hostname and interface set.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, RouterSimError};

/// Initial state for the simulated router (`routersim.toml`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouterSimConfig {
    #[serde(default = "default_hostname")]
    pub hostname: String,
    /// Software version string shown by `show version` and the running config.
    #[serde(default = "default_version")]
    pub version: String,
    /// Physical interface names, in display order.
    #[serde(default = "default_interfaces")]
    pub interfaces: Vec<String>,
    /// Message of the day printed when the session starts.
    #[serde(default)]
    pub banner_motd: Option<String>,
}

fn default_hostname() -> String {
    "Router".to_string()
}
fn default_version() -> String {
    "RouterSim IOS Software, Version 0.1".to_string()
}
fn default_interfaces() -> Vec<String> {
    [
        "GigabitEthernet0/0",
        "GigabitEthernet0/0/0",
        "GigabitEthernet0/0/1",
        "Serial0/0/0",
        "Serial0/0/1",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for RouterSimConfig {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            version: default_version(),
            interfaces: default_interfaces(),
            banner_motd: None,
        }
    }
}

/// IOS hostname rule: a leading letter, then letters, digits, `-` or `_`,
/// at most 63 characters.
pub fn is_valid_hostname(name: &str) -> bool {
    name.len() <= 63
        && name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl RouterSimConfig {
    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::info!(
            "Loaded config from {} ({} interfaces)",
            path.display(),
            config.interfaces.len()
        );
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !is_valid_hostname(&self.hostname) {
            return Err(RouterSimError::Config(format!(
                "invalid hostname: {:?}",
                self.hostname
            )));
        }
        let mut seen = HashSet::new();
        for name in &self.interfaces {
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(RouterSimError::Config(format!(
                    "invalid interface name: {name:?}"
                )));
            }
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(RouterSimError::Config(format!(
                    "duplicate interface: {name}"
                )));
            }
        }
        Ok(())
    }
}
