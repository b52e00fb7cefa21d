//! Panel configuration. Reads `panel.toml` and falls back to defaults when
//! the file is missing or malformed.

use crate::PanelError;
use crate::policy::PolicyConfig;
use crate::registry::DEFAULT_GROUP;
use panelkit_discovery::DiscoveryConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "PANELKIT_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "panel.toml";

/// Presentation fallbacks applied during serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_group")]
    pub group: String,
}

fn default_icon() -> String {
    "document-text".to_string()
}

fn default_group() -> String {
    DEFAULT_GROUP.to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            icon: default_icon(),
            group: default_group(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl PanelConfig {
    /// Loads from `$PANELKIT_CONFIG`, or `./panel.toml`.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    /// Loads from an explicit path.
    ///
    /// A relative discovery path is resolved against the config file's
    /// directory.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!(path = %path.display(), "No panel config found, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(mut config) => {
                    if config.discovery.path.is_relative() {
                        if let Some(base) = path.parent() {
                            config.discovery.path = base.join(&config.discovery.path);
                        }
                    }
                    info!(path = %path.display(), "Loaded panel config");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse panel config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read panel config, using defaults");
                Self::default()
            }
        }
    }

    /// Strict parse; used by `load_from` and by callers that want the error.
    pub fn from_toml_str(contents: &str) -> Result<Self, PanelError> {
        toml::from_str(contents).map_err(|e| PanelError::Config(e.to_string()))
    }
}
