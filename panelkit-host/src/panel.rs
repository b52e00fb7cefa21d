//! Central panel state.
//!
//! Owns the three registries, enforces the registration policy, and turns
//! registered entities into per-request payloads.

use crate::error::PanelError;
use crate::policy::RegistrationPolicy;
use crate::props::{CardProps, InertiaPage, SharedProps};
use crate::registry::Registry;
use crate::PanelConfig;
use panelkit_discovery::Discovery;
use panelkit_model::{AnyElement, Card, Dashboard, Element, ModelError, Page, RequestContext};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct Panel {
    config: PanelConfig,
    policy: RegistrationPolicy,
    discovery: Discovery,
    cards: Registry<Card>,
    pages: Registry<Page>,
    dashboards: Registry<Dashboard>,
}

#[derive(Serialize)]
struct PageProps<'a> {
    #[serde(flatten)]
    shared: SharedProps,
    page: &'a Page,
}

#[derive(Serialize)]
struct DashboardProps<'a> {
    #[serde(flatten)]
    shared: SharedProps,
    dashboard: &'a Dashboard,
    #[serde(rename = "dashboardCards")]
    cards: Vec<CardProps>,
}

impl Panel {
    pub fn new(config: PanelConfig) -> Self {
        let policy = RegistrationPolicy::new(&config.policy);
        let discovery = Discovery::new(config.discovery.clone());
        Self {
            config,
            policy,
            discovery,
            cards: Registry::new(),
            pages: Registry::new(),
            dashboards: Registry::new(),
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    // ================================================================
    // Registration
    // ================================================================

    /// Registers every discovered entity.
    ///
    /// Entities blocked by policy or clashing with an already registered
    /// uri key are skipped with a warning. Returns how many were added.
    pub fn boot(&mut self) -> usize {
        let mut added = 0;

        for element in self.discovery.load_all() {
            let registered = match element {
                AnyElement::Card(card) => boot_one(&self.policy, &mut self.cards, card),
                AnyElement::Page(page) => boot_one(&self.policy, &mut self.pages, page),
                AnyElement::Dashboard(dashboard) => {
                    boot_one(&self.policy, &mut self.dashboards, dashboard)
                }
            };
            added += usize::from(registered);
        }

        info!(
            cards = self.cards.len(),
            pages = self.pages.len(),
            dashboards = self.dashboards.len(),
            "Panel booted"
        );
        added
    }

    pub fn register_cards<I>(&mut self, cards: I) -> Result<(), PanelError>
    where
        I: IntoIterator<Item = Card>,
    {
        register_checked(&self.policy, &mut self.cards, cards)
    }

    pub fn register_pages<I>(&mut self, pages: I) -> Result<(), PanelError>
    where
        I: IntoIterator<Item = Page>,
    {
        register_checked(&self.policy, &mut self.pages, pages)
    }

    pub fn register_dashboards<I>(&mut self, dashboards: I) -> Result<(), PanelError>
    where
        I: IntoIterator<Item = Dashboard>,
    {
        register_checked(&self.policy, &mut self.dashboards, dashboards)
    }

    /// Empties every registry and the discovery cache.
    pub fn flush(&mut self) {
        self.cards.clear();
        self.pages.clear();
        self.dashboards.clear();
        self.discovery.clear_cache();
        info!("Panel flushed");
    }

    // ================================================================
    // Queries
    // ================================================================

    pub fn cards(&self) -> &Registry<Card> {
        &self.cards
    }

    pub fn pages(&self) -> &Registry<Page> {
        &self.pages
    }

    pub fn dashboards(&self) -> &Registry<Dashboard> {
        &self.dashboards
    }

    /// First validation failure across dashboards, pages, then cards.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.dashboards.validate_all()?;
        self.pages.validate_all()?;
        self.cards.validate_all()
    }

    // ================================================================
    // Responses
    // ================================================================

    /// Navigation payload for `ctx`. Unauthorized entities are left out.
    pub fn shared_props(&self, ctx: &RequestContext) -> SharedProps {
        SharedProps::build(
            self.dashboards.authorized(ctx),
            self.pages.authorized(ctx),
            self.cards.authorized(ctx),
            &self.config.defaults,
        )
    }

    pub fn page_response(&self, uri_key: &str, ctx: &RequestContext) -> Result<InertiaPage, PanelError> {
        let page = authorized_entry(&self.pages, uri_key, ctx)?;
        page.validate()?;
        let component = primary_component(page)?;

        let props = serde_json::to_value(PageProps {
            shared: self.shared_props(ctx),
            page,
        })?;
        Ok(InertiaPage {
            component,
            props,
            url: request_url(ctx),
        })
    }

    /// Like [`Self::page_response`]; only the cards `ctx` may see are included.
    pub fn dashboard_response(&self, uri_key: &str, ctx: &RequestContext) -> Result<InertiaPage, PanelError> {
        let dashboard = authorized_entry(&self.dashboards, uri_key, ctx)?;
        dashboard.validate()?;
        let component = primary_component(dashboard)?;

        let cards = dashboard
            .authorized_cards(ctx)
            .into_iter()
            .map(CardProps::from)
            .collect();
        let props = serde_json::to_value(DashboardProps {
            shared: self.shared_props(ctx),
            dashboard,
            cards,
        })?;
        Ok(InertiaPage {
            component,
            props,
            url: request_url(ctx),
        })
    }
}

fn register_checked<E, I>(
    policy: &RegistrationPolicy,
    registry: &mut Registry<E>,
    entities: I,
) -> Result<(), PanelError>
where
    E: Element,
    I: IntoIterator<Item = E>,
{
    let batch: Vec<E> = entities.into_iter().collect();
    if let Some(denied) = batch.iter().find(|e| !policy.is_allowed(&e.uri_key())) {
        return Err(PanelError::PolicyDenied(format!(
            "{} '{}' blocked by policy",
            E::KIND,
            denied.uri_key()
        )));
    }
    let count = batch.len();
    registry.register(batch)?;
    debug!(kind = %E::KIND, count, "Registered entities");
    Ok(())
}

fn boot_one<E: Element>(policy: &RegistrationPolicy, registry: &mut Registry<E>, entity: E) -> bool {
    let uri_key = entity.uri_key();
    if !policy.is_allowed(&uri_key) {
        warn!(kind = %E::KIND, uri_key = %uri_key, "Discovered entity blocked by policy");
        return false;
    }
    match registry.register([entity]) {
        Ok(()) => true,
        Err(e) => {
            warn!(kind = %E::KIND, uri_key = %uri_key, error = %e, "Skipping discovered entity");
            false
        }
    }
}

fn authorized_entry<'a, E: Element>(
    registry: &'a Registry<E>,
    uri_key: &str,
    ctx: &RequestContext,
) -> Result<&'a E, PanelError> {
    let entity = registry.get(uri_key)?;
    if !entity.authorize(ctx) {
        debug!(kind = %E::KIND, uri_key, user = ?ctx.user_id(), "Access denied");
        return Err(PanelError::Forbidden {
            kind: E::KIND,
            uri_key: uri_key.to_string(),
        });
    }
    Ok(entity)
}

fn primary_component<E: Element>(entity: &E) -> Result<String, PanelError> {
    entity
        .descriptor()
        .component()
        .map(str::to_string)
        .ok_or_else(|| {
            PanelError::Invalid(ModelError::MissingComponent {
                kind: E::KIND,
                class: entity.descriptor().class().to_string(),
            })
        })
}

fn request_url(ctx: &RequestContext) -> String {
    if ctx.query.is_empty() {
        return ctx.path.clone();
    }
    let query: Vec<String> = ctx
        .query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    format!("{}?{}", ctx.path, query.join("&"))
}
