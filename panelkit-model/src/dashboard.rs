//! Dashboards: ordered card collections rendered by a shared component.

use crate::descriptor::impl_descriptor_builders;
use crate::{Card, Descriptor, Element, ElementKind, Meta, ModelError, RequestContext};
use serde::Serialize;

/// Component rendered for every dashboard unless overridden.
pub const DEFAULT_DASHBOARD_COMPONENT: &str = "Dashboard";

/// A named collection of cards.
#[derive(Debug, Clone)]
pub struct Dashboard {
    descriptor: Descriptor,
    cards: Vec<Card>,
    show_refresh_button: bool,
}

impl Dashboard {
    pub fn make(class: impl Into<String>) -> Self {
        let mut descriptor = Descriptor::new(ElementKind::Dashboard, class);
        descriptor.set_components(vec![DEFAULT_DASHBOARD_COMPONENT.to_string()]);
        Self {
            descriptor,
            cards: Vec::new(),
            show_refresh_button: false,
        }
    }

    /// Appends cards in display order.
    pub fn with_cards<I>(mut self, cards: I) -> Self
    where
        I: IntoIterator<Item = Card>,
    {
        self.cards.extend(cards);
        self
    }

    pub fn show_refresh_button(mut self) -> Self {
        self.show_refresh_button = true;
        self
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards visible to the current request, in display order.
    pub fn authorized_cards(&self, ctx: &RequestContext) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.authorize(ctx)).collect()
    }

    pub fn has_refresh_button(&self) -> bool {
        self.show_refresh_button
    }
}

impl_descriptor_builders!(Dashboard);

impl Element for Dashboard {
    const KIND: ElementKind = ElementKind::Dashboard;

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Validates the dashboard itself, then each of its cards.
    fn validate(&self) -> Result<(), ModelError> {
        self.descriptor.validate()?;
        self.cards.iter().try_for_each(|card| card.validate())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardRepr<'a> {
    name: String,
    uri_key: String,
    component: Option<&'a str>,
    show_refresh_button: bool,
    meta: &'a Meta,
}

impl Serialize for Dashboard {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DashboardRepr {
            name: self.name(),
            uri_key: self.uri_key(),
            component: self.component(),
            show_refresh_button: self.show_refresh_button,
            meta: self.meta(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::User;

    #[test]
    fn default_component_and_identity() {
        let dashboard = Dashboard::make("MainDashboard");
        assert_eq!(dashboard.uri_key(), "main");
        assert_eq!(dashboard.name(), "Main");
        assert_eq!(dashboard.component(), Some(DEFAULT_DASHBOARD_COMPONENT));
        assert!(dashboard.validate().is_ok());
    }

    #[test]
    fn invalid_card_fails_dashboard_validation() {
        let dashboard = Dashboard::make("MainDashboard").with_cards([Card::make("BrokenCard")]);
        assert!(matches!(
            dashboard.validate(),
            Err(ModelError::MissingComponent {
                kind: ElementKind::Card,
                ..
            })
        ));
    }

    #[test]
    fn authorized_cards_filter_in_order() {
        let dashboard = Dashboard::make("MainDashboard").with_cards([
            Card::make("UsersCard").with_component("users"),
            Card::make("RevenueCard")
                .with_component("revenue")
                .can_see_when("view-revenue"),
            Card::make("UptimeCard").with_component("uptime"),
        ]);

        let guest = RequestContext::guest("/dashboards/main");
        let keys: Vec<String> = dashboard
            .authorized_cards(&guest)
            .iter()
            .map(|c| c.uri_key())
            .collect();
        assert_eq!(keys, vec!["users", "uptime"]);

        let finance = RequestContext::for_user(
            User::new("u1").with_ability("view-revenue"),
            "/dashboards/main",
        );
        assert_eq!(dashboard.authorized_cards(&finance).len(), 3);
    }
}
