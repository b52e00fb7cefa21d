//! Discovery of panelkit entities from a manifest directory.
//!
//! Each entity is declared in its own `*.toml` file whose stem is the class
//! name. Directory segments below the discovery root become namespace
//! segments of the resulting [`ClassId`]:
//!
//! ```text
//! panel/
//!   cards/Sales/RevenueCard.toml   -> app::cards::sales::RevenueCard
//!   pages/ReportsPage.toml         -> app::pages::ReportsPage
//! ```
//!
//! Discovery is best-effort: a missing root, an unreadable file or a
//! malformed manifest never fails the scan, it only drops that entry.
//! Scans can be memoized with a TTL, in memory and optionally on disk.

mod cache;
mod class_id;
mod config;
mod discovery;
mod error;
mod manifest;

pub use cache::DiscoveryCache;
pub use class_id::ClassId;
pub use config::{CacheConfig, DiscoveryConfig};
pub use discovery::{DiscoveredClass, Discovery};
pub use error::DiscoveryError;
pub use manifest::{CardManifest, ElementManifest};
