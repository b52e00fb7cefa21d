//! Dashboard cards and their widths.

use crate::descriptor::impl_descriptor_builders;
use crate::{Descriptor, Element, ElementKind, Meta};
use serde::{Deserialize, Serialize};

/// Fraction of the dashboard row a card occupies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardWidth {
    #[serde(rename = "full")]
    Full,
    #[serde(rename = "1/2")]
    Half,
    #[default]
    #[serde(rename = "1/3")]
    Third,
    #[serde(rename = "1/4")]
    Quarter,
    #[serde(rename = "2/3")]
    TwoThirds,
    #[serde(rename = "3/4")]
    ThreeQuarters,
}

/// A dashboard widget.
#[derive(Debug, Clone)]
pub struct Card {
    descriptor: Descriptor,
    width: CardWidth,
}

impl Card {
    pub fn make(class: impl Into<String>) -> Self {
        Self {
            descriptor: Descriptor::new(ElementKind::Card, class),
            width: CardWidth::default(),
        }
    }

    pub fn with_width(mut self, width: CardWidth) -> Self {
        self.width = width;
        self
    }

    pub fn width(&self) -> CardWidth {
        self.width
    }
}

impl_descriptor_builders!(Card);

impl Element for Card {
    const KIND: ElementKind = ElementKind::Card;

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardRepr<'a> {
    name: String,
    uri_key: String,
    component: Option<&'a str>,
    width: CardWidth,
    meta: &'a Meta,
}

impl Serialize for Card {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CardRepr {
            name: self.name(),
            uri_key: self.uri_key(),
            component: self.component(),
            width: self.width,
            meta: self.meta(),
        }
        .serialize(serializer)
    }
}
