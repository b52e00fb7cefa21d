//! Recursive manifest scanning.

use crate::manifest::{ManifestHeader, check_declared_class};
use crate::{ClassId, DiscoveryCache, DiscoveryConfig, DiscoveryError, ElementManifest};
use panelkit_model::{AnyElement, ElementKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const MANIFEST_EXTENSION: &str = "toml";

/// A manifest found during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredClass {
    pub id: ClassId,
    pub kind: ElementKind,
    pub path: PathBuf,
}

impl DiscoveredClass {
    /// Parses the full manifest behind this class.
    pub fn load(&self) -> Result<ElementManifest, DiscoveryError> {
        ElementManifest::from_path(&self.path)
    }

    /// Parses the manifest and builds the live entity.
    pub fn resolve(&self) -> Result<AnyElement, DiscoveryError> {
        Ok(self.load()?.into_element(&self.id))
    }
}

/// Scans a manifest directory for entities of a given kind.
#[derive(Debug)]
pub struct Discovery {
    config: DiscoveryConfig,
    cache: DiscoveryCache,
}

impl Discovery {
    pub fn new(config: DiscoveryConfig) -> Self {
        let cache = DiscoveryCache::new(&config.cache, &config.path);
        Self { config, cache }
    }

    /// Classes of `kind`, in scan order.
    pub fn discover(&self, kind: ElementKind) -> Vec<DiscoveredClass> {
        self.discover_all()
            .into_iter()
            .filter(|class| class.kind == kind)
            .collect()
    }

    /// Every class under the root, deduplicated by id, in scan order.
    ///
    /// Served from the cache while it is fresh, so files added or removed
    /// since the last scan stay invisible until expiry or [`Self::clear_cache`].
    pub fn discover_all(&self) -> Vec<DiscoveredClass> {
        if !self.config.enabled {
            debug!("Discovery disabled");
            return Vec::new();
        }

        if !self.config.cache.enabled {
            return self.scan();
        }

        let now = chrono::Utc::now().timestamp_millis();
        if let Some(classes) = self.cache.get(now) {
            return classes;
        }

        let classes = self.scan();
        self.cache.put(classes.clone(), now);
        classes
    }

    /// Resolves every discovered class of `kind` into a live entity.
    /// Manifests that fail to load are skipped.
    pub fn load(&self, kind: ElementKind) -> Vec<AnyElement> {
        resolve_all(&self.discover(kind))
    }

    /// Like [`Self::load`] for every kind, from a single scan.
    pub fn load_all(&self) -> Vec<AnyElement> {
        resolve_all(&self.discover_all())
    }

    /// Forces the next call to re-scan the filesystem.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn scan(&self) -> Vec<DiscoveredClass> {
        let root = &self.config.path;
        if !root.is_dir() {
            debug!(path = %root.display(), "Discovery root missing, nothing to scan");
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut classes = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable discovery entry");
                    None
                }
            })
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(MANIFEST_EXTENSION) {
                continue;
            }

            match self.classify(root, path) {
                Ok(class) => {
                    if seen.insert(class.id.clone()) {
                        classes.push(class);
                    } else {
                        debug!(class = %class.id, path = %path.display(), "Duplicate class id, keeping first");
                    }
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping manifest"),
            }
        }

        info!(path = %root.display(), classes = classes.len(), "Discovery scan complete");
        classes
    }

    fn classify(&self, root: &Path, path: &Path) -> Result<DiscoveredClass, DiscoveryError> {
        let relative = path
            .strip_prefix(root)
            .map_err(|_| DiscoveryError::InvalidPath(path.to_path_buf()))?;
        let id = ClassId::from_relative_path(&self.config.namespace, relative)
            .ok_or_else(|| DiscoveryError::InvalidPath(path.to_path_buf()))?;
        let header = ManifestHeader::read(path)?;
        check_declared_class(path, header.class.as_deref())?;

        Ok(DiscoveredClass {
            id,
            kind: header.kind,
            path: path.to_path_buf(),
        })
    }
}

fn resolve_all(classes: &[DiscoveredClass]) -> Vec<AnyElement> {
    classes
        .iter()
        .filter_map(|class| match class.resolve() {
            Ok(element) => Some(element),
            Err(e) => {
                warn!(class = %class.id, error = %e, "Skipping unresolvable manifest");
                None
            }
        })
        .collect()
}
