use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path};

/// Fully qualified identifier of a discovered class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId {
    pub namespace: Vec<String>,
    pub name: String,
}

impl ClassId {
    pub fn new(namespace: Vec<String>, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }

    /// Builds an id from a manifest path relative to the discovery root.
    ///
    /// Directory segments are snake-cased; the file stem is the class name.
    /// Returns `None` for paths without a usable file stem.
    pub fn from_relative_path(root_namespace: &str, relative: &Path) -> Option<Self> {
        let name = relative.file_stem()?.to_str()?;
        if name.is_empty() {
            return None;
        }

        let mut namespace: Vec<String> = root_namespace
            .split("::")
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if let Some(parent) = relative.parent() {
            for component in parent.components() {
                match component {
                    Component::Normal(segment) => {
                        namespace.push(segment.to_str()?.to_case(Case::Snake));
                    }
                    Component::CurDir => {}
                    _ => return None,
                }
            }
        }

        Some(Self::new(namespace, name))
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.namespace {
            write!(f, "{segment}::")?;
        }
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn nested_path_becomes_namespace() {
        let id = ClassId::from_relative_path("app", &PathBuf::from("cards/Sales/RevenueCard.toml")).unwrap();
        assert_eq!(id.namespace, vec!["app", "cards", "sales"]);
        assert_eq!(id.name, "RevenueCard");
        assert_eq!(id.to_string(), "app::cards::sales::RevenueCard");
    }

    #[test]
    fn top_level_file() {
        let id = ClassId::from_relative_path("app", &PathBuf::from("ReportsPage.toml")).unwrap();
        assert_eq!(id.to_string(), "app::ReportsPage");
    }

    #[test]
    fn empty_root_namespace() {
        let id = ClassId::from_relative_path("", &PathBuf::from("pages/ReportsPage.toml")).unwrap();
        assert_eq!(id.to_string(), "pages::ReportsPage");
    }

    #[test]
    fn multi_segment_root_namespace() {
        let id = ClassId::from_relative_path("acme::panel", &PathBuf::from("MainDashboard.toml")).unwrap();
        assert_eq!(id.namespace, vec!["acme", "panel"]);
    }

    #[test]
    fn parent_components_rejected() {
        assert!(ClassId::from_relative_path("app", &PathBuf::from("../RevenueCard.toml")).is_none());
    }
}
