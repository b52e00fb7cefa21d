//! Host side of panelkit.
//!
//! Aggregates cards, pages and dashboards (registered explicitly or found by
//! discovery), filters them through each entity's visibility callback for
//! the current request, and flattens the survivors into the shared-props
//! payload the SPA shell renders its navigation from.
//!
//! Unauthorized entities are dropped before serialization; they never reach
//! the client.

mod config;
mod error;
mod panel;
mod policy;
mod props;
mod registry;

pub use config::{CONFIG_ENV, DefaultsConfig, PanelConfig};
pub use error::PanelError;
pub use panel::Panel;
pub use policy::{PolicyConfig, PolicyMode, RegistrationPolicy};
pub use props::{CardProps, InertiaPage, MenuSection, NavigationItem, Navigable, SharedProps};
pub use registry::{DEFAULT_GROUP, Group, Registry, partition};

pub use panelkit_discovery as discovery;
pub use panelkit_model as model;
