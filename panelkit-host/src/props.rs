//! Flat, client-facing shapes of registered entities.
//!
//! Everything here is built from already-authorized entities; nothing in
//! this module consults visibility callbacks.

use crate::DefaultsConfig;
use crate::registry::{Group, partition};
use panelkit_model::{Badge, Card, CardWidth, Dashboard, Element, ElementKind, Meta, Page};
use serde::Serialize;
use serde_json::Value;

/// Entities that can appear in the navigation menu.
pub trait Navigable: Element {
    fn badge(&self) -> Option<&Badge> {
        None
    }

    fn visible_in_navigation(&self) -> bool {
        true
    }
}

impl Navigable for Page {
    fn badge(&self) -> Option<&Badge> {
        Page::badge(self)
    }

    fn visible_in_navigation(&self) -> bool {
        Page::visible_in_navigation(self)
    }
}

impl Navigable for Dashboard {}

/// One menu entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub uri_key: String,
    pub name: String,
    pub icon: String,
    pub group: String,
    pub component: Option<String>,
    pub kind: ElementKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    pub visible: bool,
}

impl NavigationItem {
    pub fn from_element<E: Navigable>(element: &E, defaults: &DefaultsConfig) -> Self {
        let descriptor = element.descriptor();
        Self {
            uri_key: element.uri_key(),
            name: element.name(),
            icon: descriptor.icon().unwrap_or(defaults.icon.as_str()).to_string(),
            group: menu_group(element.group(), &defaults.group),
            component: descriptor.component().map(str::to_string),
            kind: E::KIND,
            badge: element.badge().cloned(),
            visible: element.visible_in_navigation(),
        }
    }
}

/// Resolves the section name the same way [`partition`] buckets it: blank
/// names and any casing of the default land in the default group.
fn menu_group(group: Option<&str>, default_group: &str) -> String {
    match group {
        Some(name) if !name.trim().is_empty() && name.to_lowercase() != default_group.to_lowercase() => {
            name.to_string()
        }
        _ => default_group.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardProps {
    pub uri_key: String,
    pub name: String,
    pub component: Option<String>,
    pub width: CardWidth,
    pub meta: Meta,
}

impl From<&Card> for CardProps {
    fn from(card: &Card) -> Self {
        Self {
            uri_key: card.uri_key(),
            name: card.name(),
            component: card.component().map(str::to_string),
            width: card.width(),
            meta: card.meta().clone(),
        }
    }
}

pub type MenuSection = Group<NavigationItem>;

/// Payload shared with every rendered page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SharedProps {
    pub dashboards: Vec<NavigationItem>,
    pub pages: Vec<NavigationItem>,
    pub cards: Vec<CardProps>,
    pub navigation: Vec<MenuSection>,
}

impl SharedProps {
    /// Builds the payload from entities that already passed authorization.
    pub fn build<'a>(
        dashboards: impl IntoIterator<Item = &'a Dashboard>,
        pages: impl IntoIterator<Item = &'a Page>,
        cards: impl IntoIterator<Item = &'a Card>,
        defaults: &DefaultsConfig,
    ) -> Self {
        let dashboards: Vec<NavigationItem> = dashboards
            .into_iter()
            .map(|d| NavigationItem::from_element(d, defaults))
            .collect();
        let pages: Vec<NavigationItem> = pages
            .into_iter()
            .map(|p| NavigationItem::from_element(p, defaults))
            .collect();
        let cards = cards.into_iter().map(CardProps::from).collect();

        let menu = dashboards
            .iter()
            .chain(pages.iter())
            .filter(|item| item.visible)
            .cloned();
        let navigation = partition(
            menu,
            &defaults.group,
            |item| Some(item.group.clone()),
            |item| item.name.clone(),
        );

        Self {
            dashboards,
            pages,
            cards,
            navigation,
        }
    }

    /// Every uri key present anywhere in the payload.
    pub fn uri_keys(&self) -> Vec<&str> {
        self.dashboards
            .iter()
            .chain(self.pages.iter())
            .map(|i| i.uri_key.as_str())
            .chain(self.cards.iter().map(|c| c.uri_key.as_str()))
            .collect()
    }
}

/// The page object an Inertia-style client swaps in on navigation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InertiaPage {
    pub component: String,
    pub props: Value,
    pub url: String,
}
