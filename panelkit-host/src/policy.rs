//! Registration policy: operator-managed allow/deny lists of uri keys,
//! read from the `[policy]` section of `panel.toml`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How `uri_keys` is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    /// Only listed uri keys may be registered.
    Allowlist,
    /// Every uri key except the listed ones may be registered.
    Denylist,
    /// No restrictions.
    #[default]
    Unrestricted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub mode: PolicyMode,
    #[serde(default)]
    pub uri_keys: Vec<String>,
}

/// Decides which uri keys may enter a registry.
#[derive(Debug, Clone)]
pub struct RegistrationPolicy {
    mode: PolicyMode,
    uri_keys: HashSet<String>,
}

impl RegistrationPolicy {
    pub fn new(config: &PolicyConfig) -> Self {
        Self {
            mode: config.mode,
            uri_keys: config.uri_keys.iter().cloned().collect(),
        }
    }

    pub fn unrestricted() -> Self {
        Self::new(&PolicyConfig::default())
    }

    pub fn is_allowed(&self, uri_key: &str) -> bool {
        match self.mode {
            PolicyMode::Unrestricted => true,
            PolicyMode::Allowlist => self.uri_keys.contains(uri_key),
            PolicyMode::Denylist => !self.uri_keys.contains(uri_key),
        }
    }
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self::unrestricted()
    }
}
