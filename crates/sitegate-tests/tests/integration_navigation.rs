// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Navigation Integration Tests
//!
//! Visibility of the catalog per role, and its agreement with the guard.

use std::sync::Arc;

use sitegate_tests::prelude::*;

fn filter() -> VisibilityFilter {
    VisibilityFilter::default()
}

// =============================================================================
// Built-in catalog
// =============================================================================

#[test]
fn test_catalog_order_and_icons() {
    let catalog = NavigationCatalog::construction_dashboard();
    catalog.items().assert_paths(&PathFixtures::ITEMS);

    let icons: Vec<_> = catalog.items().iter().map(|i| i.icon_id.as_str()).collect();
    assert_eq!(
        icons,
        vec![
            "layout-dashboard",
            "folder-kanban",
            "list-checks",
            "package",
            "file-bar-chart",
            "bot",
            "shield"
        ]
    );
    catalog.restricted().assert_paths(&["/reports", "/ai"]);
}

#[test]
fn test_visibility_per_role() {
    let filter = filter();
    filter.visible_for("worker").assert_paths(&["/reports", "/ai"]);
    filter.visible_for("admin").assert_paths(&PathFixtures::ITEMS);
    filter.visible_for("engineer").assert_paths(&PathFixtures::ITEMS);
    filter
        .visible_for("editor")
        .assert_paths(&["/", "/projects", "/tasks", "/materials", "/reports", "/ai"]);
    filter.visible_for("").assert_hidden("/admin");
}

#[test]
fn test_visibility_normalizes_role() {
    filter().visible_for(" Worker ").assert_paths(&["/reports", "/ai"]);
    filter().visible_for("ADMIN").assert_paths(&PathFixtures::ITEMS);
}

#[test]
fn test_visibility_for_sessions() {
    let filter = filter();
    filter
        .visible_for_session(&SessionFixtures::worker())
        .assert_paths(&["/reports", "/ai"]);
    filter
        .visible_for_session(&SessionFixtures::anonymous())
        .assert_hidden("/admin");

    let signal = SessionSignal::resolved(SessionFixtures::engineer());
    assert_eq!(filter.visible_for_session(&signal).len(), 7);
}

#[test]
fn test_visible_items_is_stable() {
    let catalog = NavigationCatalog::construction_dashboard();
    let policy = AccessPolicy::construction_dashboard();
    let first = visible_items("editor", &catalog, &policy);
    let second = visible_items("editor", &catalog, &policy);
    assert_eq!(first, second);
}

// =============================================================================
// Agreement with the guard
// =============================================================================

#[test]
fn test_visible_items_are_reachable() {
    let filter = filter();
    let policy = AccessPolicy::construction_dashboard();

    for (label, session) in SessionFixtures::authenticated() {
        for item in filter.visible_for_session(&session) {
            let decision = policy.guard_for(&item.path).evaluate(&session);
            assert!(decision.is_allowed(), "{} sees {} but is denied", label, item.path);
        }
    }
}

#[test]
fn test_hidden_default_items_are_denied() {
    let filter = filter();
    let catalog = NavigationCatalog::construction_dashboard();
    let policy = AccessPolicy::construction_dashboard();

    for role in ["admin", "engineer", "editor", ""] {
        let visible = filter.visible_for(role);
        for item in catalog.items() {
            if !visible.contains(item) {
                assert!(!policy.admits(role, &item.path), "{} hidden from '{}'", item.path, role);
            }
        }
    }
}

#[test]
fn test_custom_catalog_follows_custom_policy() {
    let catalog = NavigationCatalog::builder()
        .item("Dashboard", "layout-dashboard", "/")
        .item("Reports", "file-bar-chart", "/reports")
        .item("Finance", "banknote", "/reports/finance")
        .item("Admin", "shield", "/admin")
        .restrict("/reports")
        .restrict("/reports/finance")
        .build()
        .unwrap();
    let policy = AccessPolicy::builder()
        .route("/admin", RouteGuardPolicy::new(["admin"]))
        .route(
            "/reports/finance",
            RouteGuardPolicy::new(["admin", "engineer"]).with_redirect("/reports"),
        )
        .build()
        .unwrap();
    let filter = VisibilityFilter::new(Arc::new(catalog), Arc::new(policy));

    filter.visible_for("worker").assert_paths(&["/reports"]);
    filter
        .visible_for("engineer")
        .assert_paths(&["/", "/reports", "/reports/finance"]);
    filter
        .visible_for("admin")
        .assert_paths(&["/", "/reports", "/reports/finance", "/admin"]);
}

#[test]
fn test_catalog_rejects_unknown_restricted_path() {
    let result = NavigationCatalog::builder()
        .item("Reports", "file-bar-chart", "/reports")
        .restrict("/payroll")
        .build();
    assert!(matches!(result, Err(GateError::UnknownRestrictedPath { .. })));
}

#[test]
fn test_catalog_rejects_duplicates() {
    let result = NavigationCatalog::builder()
        .item("Reports", "file-bar-chart", "/reports")
        .item("Reports again", "file", "/reports")
        .build();
    assert!(matches!(result, Err(GateError::DuplicatePath { .. })));
}
