//! Entity contract for panelkit.
//!
//! Every unit the admin shell can surface is one of three kinds:
//! - [`Card`]: a widget rendered on a dashboard
//! - [`Page`]: a standalone screen backed by one or more frontend components
//! - [`Dashboard`]: a named collection of cards
//!
//! All three share a [`Descriptor`] carrying the metadata surface (name,
//! uri key, component, group, icon, meta bag, visibility callback) and are
//! built by value through `with_*` methods. Validation is a separate,
//! explicit step: an entity may be constructed in an incomplete state and
//! only fails once [`Element::validate`] is called.

mod card;
mod context;
mod dashboard;
mod descriptor;
mod element;
mod error;
pub mod naming;
mod page;

pub use card::{Card, CardWidth};
pub use context::{CanSee, RequestContext, User};
pub use dashboard::{Dashboard, DEFAULT_DASHBOARD_COMPONENT};
pub use descriptor::{Descriptor, Meta};
pub use element::{AnyElement, Element, ElementKind};
pub use error::ModelError;
pub use page::{Badge, BadgeVariant, Page};
