//! Registry grouping and authorization filtering.

use panelkit_host::model::{Card, Element, Page, RequestContext, User};
use panelkit_host::{DEFAULT_GROUP, Registry};
use pretty_assertions::assert_eq;

fn page(class: &str, group: Option<&str>) -> Page {
    let page = Page::make(class).with_component("c");
    match group {
        Some(group) => page.with_group(group),
        None => page,
    }
}

fn group_names<E: Element>(registry: &Registry<E>) -> Vec<String> {
    registry.grouped().into_iter().map(|g| g.name).collect()
}

// ================================================================
// Grouping
// ================================================================

#[test]
fn groups_are_alphabetical_with_default_last() {
    let mut registry = Registry::new();
    registry
        .register([
            page("BetaPage", Some("B")),
            page("AlphaPage", Some("A")),
            page("LoosePage", None),
        ])
        .unwrap();
    assert_eq!(group_names(&registry), vec!["A", "B", DEFAULT_GROUP]);
}

#[test]
fn explicit_default_shares_bucket_with_ungrouped() {
    let mut registry = Registry::new();
    registry
        .register([page("OnePage", Some("Default")), page("TwoPage", None)])
        .unwrap();
    let groups = registry.grouped();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].items.len(), 2);
}

#[test]
fn grouping_ignores_case() {
    let mut registry = Registry::new();
    registry
        .register([
            page("ZedPage", Some("zeta")),
            page("AlphaPage", Some("Alpha")),
            page("MidPage", Some("beta")),
        ])
        .unwrap();
    assert_eq!(group_names(&registry), vec!["Alpha", "beta", "zeta"]);
}

#[test]
fn items_sort_by_name_within_group() {
    let mut registry = Registry::new();
    registry
        .register([
            page("UsersPage", Some("Admin")),
            page("AuditPage", Some("Admin")),
            page("billingPage", Some("Admin")),
        ])
        .unwrap();
    let groups = registry.grouped();
    let names: Vec<String> = groups[0].items.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Audit", "Billing", "Users"]);
}

#[test]
fn custom_default_group_name() {
    let mut registry = Registry::new();
    registry.register([page("LoosePage", None), page("SalesPage", Some("Sales"))]).unwrap();
    let names: Vec<String> = registry
        .grouped_with_default("Other")
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(names, vec!["Sales", "Other"]);
}

#[test]
fn empty_registry_has_no_groups() {
    let registry: Registry<Card> = Registry::new();
    assert!(registry.grouped().is_empty());
}

// ================================================================
// Authorization
// ================================================================

#[test]
fn authorized_keeps_registry_order() {
    let mut registry = Registry::new();
    registry
        .register([
            Card::make("UsersCard").with_component("users"),
            Card::make("RevenueCard").with_component("revenue").can_see(|_| false),
            Card::make("UptimeCard").with_component("uptime"),
        ])
        .unwrap();

    let guest = RequestContext::guest("/");
    let keys: Vec<String> = registry.authorized(&guest).iter().map(|c| c.uri_key()).collect();
    assert_eq!(keys, vec!["users", "uptime"]);
}

#[test]
fn ability_gate_follows_user() {
    let mut registry = Registry::new();
    registry
        .register([Card::make("RevenueCard").with_component("revenue").can_see_when("finance")])
        .unwrap();

    assert!(registry.authorized(&RequestContext::guest("/")).is_empty());
    let finance = RequestContext::for_user(User::new("7").with_ability("finance"), "/");
    assert_eq!(registry.authorized(&finance).len(), 1);
    let root = RequestContext::for_user(User::new("1").with_ability("*"), "/");
    assert_eq!(registry.authorized(&root).len(), 1);
}

#[test]
fn validate_all_reports_first_failure() {
    let mut registry = Registry::new();
    registry
        .register([Page::make("GoodPage").with_component("good"), Page::make("BadPage")])
        .unwrap();
    let err = registry.validate_all().unwrap_err();
    assert!(err.to_string().contains("BadPage"));
}
