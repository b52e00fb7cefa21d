//! The `Element` trait the registries are generic over, and the kind-erased
//! `AnyElement` produced by manifest resolution.

use crate::{Card, Dashboard, Descriptor, ModelError, Page, RequestContext};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three registrable entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Card,
    Page,
    Dashboard,
}

impl ElementKind {
    /// Conventional class-name suffix stripped before deriving names.
    pub fn class_suffix(&self) -> &'static str {
        match self {
            Self::Card => "Card",
            Self::Page => "Page",
            Self::Dashboard => "Dashboard",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Page => "page",
            Self::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common surface of cards, pages and dashboards.
pub trait Element: fmt::Debug + Send + Sync {
    const KIND: ElementKind;

    fn descriptor(&self) -> &Descriptor;

    fn uri_key(&self) -> String {
        self.descriptor().uri_key()
    }

    fn name(&self) -> String {
        self.descriptor().name()
    }

    fn group(&self) -> Option<&str> {
        self.descriptor().group()
    }

    /// True unless a visibility callback is set and rejects the request.
    fn authorize(&self, ctx: &RequestContext) -> bool {
        self.descriptor().authorize(ctx)
    }

    /// Checks the entity is complete enough to be served.
    fn validate(&self) -> Result<(), ModelError> {
        self.descriptor().validate()
    }
}

/// An entity of any kind, as produced by manifest resolution.
#[derive(Debug, Clone)]
pub enum AnyElement {
    Card(Card),
    Page(Page),
    Dashboard(Dashboard),
}

impl AnyElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Card(_) => ElementKind::Card,
            Self::Page(_) => ElementKind::Page,
            Self::Dashboard(_) => ElementKind::Dashboard,
        }
    }

    pub fn descriptor(&self) -> &Descriptor {
        match self {
            Self::Card(c) => c.descriptor(),
            Self::Page(p) => p.descriptor(),
            Self::Dashboard(d) => d.descriptor(),
        }
    }

    pub fn uri_key(&self) -> String {
        self.descriptor().uri_key()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            Self::Card(c) => c.validate(),
            Self::Page(p) => p.validate(),
            Self::Dashboard(d) => d.validate(),
        }
    }

    pub fn into_card(self) -> Option<Card> {
        match self {
            Self::Card(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_page(self) -> Option<Page> {
        match self {
            Self::Page(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_dashboard(self) -> Option<Dashboard> {
        match self {
            Self::Dashboard(d) => Some(d),
            _ => None,
        }
    }
}

impl From<Card> for AnyElement {
    fn from(card: Card) -> Self {
        Self::Card(card)
    }
}

impl From<Page> for AnyElement {
    fn from(page: Page) -> Self {
        Self::Page(page)
    }
}

impl From<Dashboard> for AnyElement {
    fn from(dashboard: Dashboard) -> Self {
        Self::Dashboard(dashboard)
    }
}
