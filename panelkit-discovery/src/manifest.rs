//! Entity manifests (`*.toml`) and their resolution into live entities.

use crate::{ClassId, DiscoveryError};
use panelkit_model::{AnyElement, Badge, Card, CardWidth, Dashboard, ElementKind, Meta, Page};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One entity declared in a manifest file.
///
/// Kind-specific keys are ignored on the other kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementManifest {
    pub kind: ElementKind,
    /// Must match the file stem when present.
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uri_key: Option<String>,
    #[serde(default)]
    pub component: Option<String>,
    /// Page component list; takes precedence over `component` when non-empty.
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Ability the current user must hold to see the entity.
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub meta: Meta,

    // Card
    #[serde(default)]
    pub width: Option<CardWidth>,

    // Page
    #[serde(default)]
    pub badge: Option<Badge>,
    #[serde(default = "default_navigation")]
    pub navigation: bool,

    // Dashboard
    #[serde(default)]
    pub cards: Vec<CardManifest>,
    #[serde(default)]
    pub refresh_button: bool,
}

fn default_navigation() -> bool {
    true
}

/// A card declared inline in a dashboard manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardManifest {
    pub class: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uri_key: Option<String>,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub width: Option<CardWidth>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub meta: Meta,
}

/// The two keys needed to classify a manifest without resolving it.
#[derive(Debug, Deserialize)]
pub(crate) struct ManifestHeader {
    pub kind: ElementKind,
    #[serde(default)]
    pub class: Option<String>,
}

impl ManifestHeader {
    pub(crate) fn read(path: &Path) -> Result<Self, DiscoveryError> {
        let contents = read(path)?;
        toml::from_str(&contents).map_err(|source| DiscoveryError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ElementManifest {
    pub fn from_path(path: &Path) -> Result<Self, DiscoveryError> {
        let contents = read(path)?;
        let manifest: Self = toml::from_str(&contents).map_err(|source| DiscoveryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        manifest.check_class(path)?;
        Ok(manifest)
    }

    /// Rejects a declared class that disagrees with the file stem.
    fn check_class(&self, path: &Path) -> Result<(), DiscoveryError> {
        check_declared_class(path, self.class.as_deref())
    }

    /// Builds the live entity. Completeness is not checked here; call
    /// `validate()` on the result before serving it.
    pub fn into_element(self, class_id: &ClassId) -> AnyElement {
        let Self {
            kind,
            name,
            uri_key,
            component,
            components,
            group,
            icon,
            ability,
            meta,
            width,
            badge,
            navigation,
            cards,
            refresh_button,
            ..
        } = self;
        let class = class_id.to_string();

        macro_rules! apply_common {
            ($element:expr) => {{
                let mut element = $element.with_meta(meta);
                if let Some(name) = name {
                    element = element.with_name(name);
                }
                if let Some(uri_key) = uri_key {
                    element = element.with_uri_key(uri_key);
                }
                if let Some(group) = group {
                    element = element.with_group(group);
                }
                if let Some(icon) = icon {
                    element = element.with_icon(icon);
                }
                if let Some(ability) = ability {
                    element = element.can_see_when(ability);
                }
                element
            }};
        }

        match kind {
            ElementKind::Card => {
                let mut card = apply_common!(Card::make(class));
                if let Some(component) = component {
                    card = card.with_component(component);
                }
                if let Some(width) = width {
                    card = card.with_width(width);
                }
                AnyElement::Card(card)
            }
            ElementKind::Page => {
                let mut page = apply_common!(Page::make(class));
                if !components.is_empty() {
                    page = page.with_components(components);
                } else if let Some(component) = component {
                    page = page.with_component(component);
                }
                if let Some(badge) = badge {
                    page = page.with_badge(badge);
                }
                if !navigation {
                    page = page.hidden_from_navigation();
                }
                AnyElement::Page(page)
            }
            ElementKind::Dashboard => {
                let mut dashboard = apply_common!(Dashboard::make(class))
                    .with_cards(cards.into_iter().map(CardManifest::into_card));
                if let Some(component) = component {
                    dashboard = dashboard.with_component(component);
                }
                if refresh_button {
                    dashboard = dashboard.show_refresh_button();
                }
                AnyElement::Dashboard(dashboard)
            }
        }
    }
}

impl CardManifest {
    pub fn into_card(self) -> Card {
        let mut card = Card::make(self.class).with_meta(self.meta);
        if let Some(component) = self.component {
            card = card.with_component(component);
        }
        if let Some(width) = self.width {
            card = card.with_width(width);
        }
        if let Some(name) = self.name {
            card = card.with_name(name);
        }
        if let Some(uri_key) = self.uri_key {
            card = card.with_uri_key(uri_key);
        }
        if let Some(ability) = self.ability {
            card = card.can_see_when(ability);
        }
        card
    }
}

pub(crate) fn check_declared_class(path: &Path, declared: Option<&str>) -> Result<(), DiscoveryError> {
    let expected = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| DiscoveryError::InvalidPath(path.to_path_buf()))?;
    match declared {
        Some(declared) if declared != expected => Err(DiscoveryError::ClassMismatch {
            path: path.to_path_buf(),
            declared: declared.to_string(),
            expected: expected.to_string(),
        }),
        _ => Ok(()),
    }
}

fn read(path: &Path) -> Result<String, DiscoveryError> {
    std::fs::read_to_string(path).map_err(|source| DiscoveryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelkit_model::{BadgeVariant, Element, RequestContext, User};
    use serde_json::json;

    fn class_id(name: &str) -> ClassId {
        ClassId::new(vec!["app".into()], name)
    }

    #[test]
    fn card_manifest_resolves() {
        let manifest: ElementManifest = toml::from_str(
            r#"
            kind = "card"
            component = "revenue-card"
            width = "1/2"
            group = "Sales"

            [meta]
            currency = "EUR"
            "#,
        )
        .unwrap();

        let card = manifest.into_element(&class_id("RevenueCard")).into_card().unwrap();
        assert_eq!(card.uri_key(), "revenue");
        assert_eq!(card.component(), Some("revenue-card"));
        assert_eq!(card.width(), CardWidth::Half);
        assert_eq!(card.group(), Some("Sales"));
        assert_eq!(card.meta().get("currency"), Some(&json!("EUR")));
        assert_eq!(card.descriptor().class(), "app::RevenueCard");
    }

    #[test]
    fn page_components_take_precedence() {
        let manifest: ElementManifest = toml::from_str(
            r#"
            kind = "page"
            component = "ignored"
            components = ["reports-index", "reports-filters"]
            navigation = false

            [badge]
            value = "new"
            variant = "success"
            "#,
        )
        .unwrap();

        let page = manifest.into_element(&class_id("ReportsPage")).into_page().unwrap();
        assert_eq!(page.component(), Some("reports-index"));
        assert_eq!(page.components().len(), 2);
        assert!(!page.visible_in_navigation());
        assert_eq!(page.badge().map(|b| b.variant), Some(BadgeVariant::Success));
    }

    #[test]
    fn page_without_components_resolves_but_fails_validation() {
        let manifest: ElementManifest = toml::from_str(r#"kind = "page""#).unwrap();
        let page = manifest.into_element(&class_id("OrphanPage"));
        assert!(page.validate().is_err());
    }

    #[test]
    fn dashboard_with_inline_cards() {
        let manifest: ElementManifest = toml::from_str(
            r#"
            kind = "dashboard"
            refresh_button = true
            ability = "view-dashboards"

            [[cards]]
            class = "UsersCard"
            component = "users"

            [[cards]]
            class = "RevenueCard"
            component = "revenue"
            ability = "view-revenue"
            "#,
        )
        .unwrap();

        let dashboard = manifest.into_element(&class_id("MainDashboard")).into_dashboard().unwrap();
        assert_eq!(dashboard.uri_key(), "main");
        assert!(dashboard.has_refresh_button());
        assert_eq!(dashboard.cards().len(), 2);
        assert!(dashboard.validate().is_ok());

        let ctx = RequestContext::for_user(User::new("u1").with_ability("view-dashboards"), "/");
        assert!(dashboard.authorize(&ctx));
        assert_eq!(dashboard.authorized_cards(&ctx).len(), 1);
        assert!(!dashboard.authorize(&RequestContext::guest("/")));
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        assert!(toml::from_str::<ElementManifest>(r#"kind = "widget""#).is_err());
    }

    #[test]
    fn declared_class_must_match_file_stem() {
        let path = Path::new("cards/RevenueCard.toml");
        assert!(check_declared_class(path, Some("RevenueCard")).is_ok());
        assert!(check_declared_class(path, None).is_ok());
        assert!(matches!(
            check_declared_class(path, Some("ProfitCard")),
            Err(DiscoveryError::ClassMismatch { .. })
        ));
    }
}
