//! Standalone pages, their badges and menu visibility.

use crate::descriptor::impl_descriptor_builders;
use crate::{Descriptor, Element, ElementKind, Meta};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

/// Short label shown next to a menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub value: String,
    #[serde(default)]
    pub variant: BadgeVariant,
}

impl Badge {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            variant: BadgeVariant::default(),
        }
    }

    pub fn with_variant(mut self, variant: BadgeVariant) -> Self {
        self.variant = variant;
        self
    }
}

/// A standalone screen. The first component is the one rendered; the rest
/// are loaded alongside it.
#[derive(Debug, Clone)]
pub struct Page {
    descriptor: Descriptor,
    badge: Option<Badge>,
    visible_in_navigation: bool,
}

impl Page {
    pub fn make(class: impl Into<String>) -> Self {
        Self {
            descriptor: Descriptor::new(ElementKind::Page, class),
            badge: None,
            visible_in_navigation: true,
        }
    }

    /// Declares an ordered component list, replacing any previously declared.
    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.descriptor
            .set_components(components.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Keeps the page routable but out of the menu.
    pub fn hidden_from_navigation(mut self) -> Self {
        self.visible_in_navigation = false;
        self
    }

    pub fn components(&self) -> &[String] {
        self.descriptor.components()
    }

    pub fn badge(&self) -> Option<&Badge> {
        self.badge.as_ref()
    }

    pub fn visible_in_navigation(&self) -> bool {
        self.visible_in_navigation
    }
}

impl_descriptor_builders!(Page);

impl Element for Page {
    const KIND: ElementKind = ElementKind::Page;

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageRepr<'a> {
    name: String,
    uri_key: String,
    component: Option<&'a str>,
    components: &'a [String],
    badge: Option<&'a Badge>,
    meta: &'a Meta,
}

impl Serialize for Page {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PageRepr {
            name: self.name(),
            uri_key: self.uri_key(),
            component: self.component(),
            components: self.components(),
            badge: self.badge.as_ref(),
            meta: self.meta(),
        }
        .serialize(serializer)
    }
}
