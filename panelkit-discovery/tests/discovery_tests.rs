//! Integration tests for manifest discovery and its cache.

use panelkit_discovery::*;
use panelkit_model::{Element, ElementKind};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn ids(classes: &[DiscoveredClass]) -> Vec<String> {
    classes.iter().map(|c| c.id.to_string()).collect()
}

fn seeded_root() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "cards/UsersCard.toml", "kind = \"card\"\ncomponent = \"users\"\n");
    write(
        dir.path(),
        "cards/Sales/RevenueCard.toml",
        "kind = \"card\"\nclass = \"RevenueCard\"\ncomponent = \"revenue\"\n",
    );
    write(dir.path(), "pages/ReportsPage.toml", "kind = \"page\"\ncomponent = \"reports\"\n");
    write(dir.path(), "MainDashboard.toml", "kind = \"dashboard\"\n");
    dir
}

// ================================================================
// Scanning
// ================================================================

/// Entries are walked depth-first in file-name order.
#[test]
fn discovers_nested_classes_by_kind() {
    let root = seeded_root();
    let discovery = Discovery::new(DiscoveryConfig::at(root.path()));

    assert_eq!(
        ids(&discovery.discover(ElementKind::Card)),
        vec!["app::cards::sales::RevenueCard", "app::cards::UsersCard"]
    );
    assert_eq!(ids(&discovery.discover(ElementKind::Page)), vec!["app::pages::ReportsPage"]);
    assert_eq!(ids(&discovery.discover(ElementKind::Dashboard)), vec!["app::MainDashboard"]);
}

#[test]
fn custom_namespace_prefixes_ids() {
    let root = seeded_root();
    let discovery = Discovery::new(DiscoveryConfig::at(root.path()).with_namespace("acme::admin"));
    assert_eq!(
        ids(&discovery.discover(ElementKind::Page)),
        vec!["acme::admin::pages::ReportsPage"]
    );
}

#[test]
fn missing_directory_yields_empty_set() {
    let dir = tempfile::tempdir().unwrap();
    let discovery = Discovery::new(DiscoveryConfig::at(dir.path().join("does-not-exist")));
    assert!(discovery.discover_all().is_empty());
}

#[test]
fn empty_directory_yields_empty_set() {
    let dir = tempfile::tempdir().unwrap();
    let discovery = Discovery::new(DiscoveryConfig::at(dir.path()));
    assert!(discovery.discover(ElementKind::Card).is_empty());
}

#[test]
fn disabled_discovery_yields_empty_set() {
    let root = seeded_root();
    let discovery = Discovery::new(DiscoveryConfig::at(root.path()).disabled());
    assert!(discovery.discover_all().is_empty());
}

#[test]
fn broken_and_foreign_files_are_skipped() {
    let root = seeded_root();
    write(root.path(), "cards/BrokenCard.toml", "kind = [not toml");
    write(root.path(), "cards/WidgetCard.toml", "kind = \"widget\"\n");
    write(root.path(), "cards/MislabeledCard.toml", "kind = \"card\"\nclass = \"OtherCard\"\n");
    write(root.path(), "cards/README.md", "# not a manifest");

    let discovery = Discovery::new(DiscoveryConfig::at(root.path()));
    assert_eq!(
        ids(&discovery.discover(ElementKind::Card)),
        vec!["app::cards::sales::RevenueCard", "app::cards::UsersCard"]
    );
}

#[test]
fn ids_are_deduplicated() {
    let root = seeded_root();
    // `Sales` and `sales` map to the same namespace segment.
    write(root.path(), "cards/sales/RevenueCard.toml", "kind = \"card\"\ncomponent = \"other\"\n");

    let discovery = Discovery::new(DiscoveryConfig::at(root.path()));
    let cards = discovery.discover(ElementKind::Card);
    assert_eq!(cards.iter().filter(|c| c.id.name == "RevenueCard").count(), 1);
}

// ================================================================
// Resolution
// ================================================================

#[test]
fn load_resolves_live_entities() {
    let root = seeded_root();
    let discovery = Discovery::new(DiscoveryConfig::at(root.path()));

    let cards: Vec<_> = discovery
        .load(ElementKind::Card)
        .into_iter()
        .filter_map(|e| e.into_card())
        .collect();
    let keys: Vec<String> = cards.iter().map(|c| c.uri_key()).collect();
    assert_eq!(keys, vec!["revenue", "users"]);
    assert!(cards.iter().all(|c| c.validate().is_ok()));
}

#[test]
fn load_all_resolves_every_kind_from_one_scan() {
    let root = seeded_root();
    let discovery = Discovery::new(DiscoveryConfig::at(root.path()));

    let kinds: Vec<ElementKind> = discovery.load_all().iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::Dashboard,
            ElementKind::Card,
            ElementKind::Card,
            ElementKind::Page,
        ]
    );
}

#[test]
fn resolve_single_class() {
    let root = seeded_root();
    let discovery = Discovery::new(DiscoveryConfig::at(root.path()));
    let class = discovery.discover(ElementKind::Page).remove(0);
    let page = class.resolve().unwrap().into_page().unwrap();
    assert_eq!(page.uri_key(), "reports");
    assert_eq!(page.descriptor().class(), "app::pages::ReportsPage");
}

// ================================================================
// Caching
// ================================================================

#[test]
fn cached_result_is_stale_until_cleared() {
    let root = seeded_root();
    let discovery = Discovery::new(
        DiscoveryConfig::at(root.path()).with_cache(CacheConfig::in_memory(3600)),
    );

    assert_eq!(discovery.discover(ElementKind::Page).len(), 1);

    fs::remove_file(root.path().join("pages/ReportsPage.toml")).unwrap();
    assert_eq!(
        ids(&discovery.discover(ElementKind::Page)),
        vec!["app::pages::ReportsPage"],
        "cached scan should still list the deleted file"
    );

    discovery.clear_cache();
    assert!(discovery.discover(ElementKind::Page).is_empty());
}

#[test]
fn new_files_are_invisible_while_cached() {
    let root = seeded_root();
    let discovery = Discovery::new(
        DiscoveryConfig::at(root.path()).with_cache(CacheConfig::in_memory(3600)),
    );
    assert_eq!(discovery.discover(ElementKind::Card).len(), 2);

    write(root.path(), "cards/UptimeCard.toml", "kind = \"card\"\ncomponent = \"uptime\"\n");
    assert_eq!(discovery.discover(ElementKind::Card).len(), 2);

    discovery.clear_cache();
    assert_eq!(discovery.discover(ElementKind::Card).len(), 3);
}

#[test]
fn uncached_discovery_sees_changes_immediately() {
    let root = seeded_root();
    let discovery = Discovery::new(DiscoveryConfig::at(root.path()));
    assert_eq!(discovery.discover(ElementKind::Page).len(), 1);
    fs::remove_file(root.path().join("pages/ReportsPage.toml")).unwrap();
    assert!(discovery.discover(ElementKind::Page).is_empty());
}

#[test]
fn zero_ttl_rescans_every_call() {
    let root = seeded_root();
    let discovery = Discovery::new(
        DiscoveryConfig::at(root.path()).with_cache(CacheConfig::in_memory(0)),
    );
    assert_eq!(discovery.discover(ElementKind::Page).len(), 1);
    fs::remove_file(root.path().join("pages/ReportsPage.toml")).unwrap();
    assert!(discovery.discover(ElementKind::Page).is_empty());
}

#[test]
fn disk_cache_is_shared_across_instances() {
    let root = seeded_root();
    let cache_dir = tempfile::tempdir().unwrap();
    let config = DiscoveryConfig::at(root.path())
        .with_cache(CacheConfig::on_disk(3600, cache_dir.path()));

    assert_eq!(Discovery::new(config.clone()).discover(ElementKind::Card).len(), 2);
    fs::remove_file(root.path().join("cards/UsersCard.toml")).unwrap();

    let second = Discovery::new(config.clone());
    assert_eq!(second.discover(ElementKind::Card).len(), 2);

    second.clear_cache();
    assert_eq!(Discovery::new(config).discover(ElementKind::Card).len(), 1);
}
