//! Discovery settings, read from the `[discovery]` section of `panel.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Root directory scanned for manifests.
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Namespace prefixed to every discovered class.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_enabled() -> bool {
    true
}

fn default_path() -> PathBuf {
    PathBuf::from("panel")
}

fn default_namespace() -> String {
    "app".to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: default_path(),
            namespace: default_namespace(),
            cache: CacheConfig::default(),
        }
    }
}

impl DiscoveryConfig {
    /// Enabled discovery rooted at `path`, without caching.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Scan memoization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Directory for the on-disk copy; memory only when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_ttl_secs() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_secs: default_ttl_secs(),
            dir: None,
        }
    }
}

impl CacheConfig {
    pub fn in_memory(ttl_secs: u64) -> Self {
        Self {
            enabled: true,
            ttl_secs,
            dir: None,
        }
    }

    pub fn on_disk(ttl_secs: u64, dir: impl Into<PathBuf>) -> Self {
        Self {
            enabled: true,
            ttl_secs,
            dir: Some(dir.into()),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DiscoveryConfig::default();
        assert!(config.enabled);
        assert_eq!(config.path, PathBuf::from("panel"));
        assert_eq!(config.namespace, "app");
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl(), Duration::from_secs(300));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: DiscoveryConfig = toml::from_str(
            r#"
            path = "resources/panel"

            [cache]
            enabled = true
            "#,
        )
        .unwrap();
        assert!(config.enabled);
        assert_eq!(config.path, PathBuf::from("resources/panel"));
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.cache.dir, None);
    }
}
