// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Route Guard Integration Tests
//!
//! - `test_guard_*`: decisions for every session shape
//! - `test_policy_*`: path matching and the policy table
//! - `test_signal_*`: guards following a live session signal

use std::sync::Arc;
use std::time::Duration;

use sitegate_tests::prelude::*;

fn policy() -> AccessPolicy {
    AccessPolicy::construction_dashboard()
}

// =============================================================================
// Guard decisions
// =============================================================================

#[test]
fn test_guard_loading_never_redirects() {
    init_test_logging();
    for path in PathFixtures::ITEMS.iter().chain(PathFixtures::ADMIN_TREE.iter()) {
        policy().guard_for(path).evaluate(&SessionFixtures::loading()).assert_loading();
    }
}

#[test]
fn test_guard_unauthenticated_goes_to_auth() {
    for path in PathFixtures::ITEMS {
        policy()
            .guard_for(path)
            .evaluate(&SessionFixtures::anonymous())
            .assert_redirect(GuardState::Unauthenticated, "/auth");
    }
}

#[test]
fn test_guard_admin_tree_by_role() {
    for path in PathFixtures::ADMIN_TREE {
        let guard = policy().guard_for(path);
        guard.evaluate(&SessionFixtures::admin()).assert_allowed();
        guard.evaluate(&SessionFixtures::engineer()).assert_allowed();
        guard
            .evaluate(&SessionFixtures::worker())
            .assert_redirect(GuardState::Unauthorized, "/");
        guard
            .evaluate(&SessionFixtures::editor())
            .assert_redirect(GuardState::Unauthorized, "/");
        guard
            .evaluate(&SessionFixtures::no_role())
            .assert_redirect(GuardState::Unauthorized, "/");
    }
}

#[test]
fn test_guard_role_is_case_insensitive() {
    let guard = policy().guard_for("/admin");
    guard.evaluate(&SessionFixtures::with_role("Admin")).assert_allowed();
    guard.evaluate(&SessionFixtures::with_role(" ENGINEER ")).assert_allowed();
}

#[test]
fn test_guard_unguarded_routes_only_need_a_session() {
    for (label, session) in SessionFixtures::authenticated() {
        for path in ["/", "/projects", "/tasks", "/materials", "/reports", "/ai"] {
            let decision = policy().guard_for(path).evaluate(&session);
            assert!(decision.is_allowed(), "{} should reach {}", label, path);
        }
    }
}

#[test]
fn test_guard_public_paths_admit_everyone() {
    for path in PathFixtures::PUBLIC {
        let guard = policy().guard_for(path);
        assert!(!guard.is_protected());
        guard.evaluate(&SessionFixtures::anonymous()).assert_allowed();
        guard.evaluate(&SessionFixtures::worker()).assert_allowed();
    }
}

#[test]
fn test_guard_check_reads_provider() {
    let signal = SessionSignal::resolved(SessionFixtures::worker());
    policy()
        .guard_for("/admin")
        .check(&signal)
        .assert_redirect(GuardState::Unauthorized, "/");
}

// =============================================================================
// Policy table
// =============================================================================

#[test]
fn test_policy_sibling_prefix_is_not_guarded() {
    for path in PathFixtures::ADMIN_SIBLINGS {
        assert!(policy().rule_for(path).is_none(), "{} matched /admin", path);
        policy().guard_for(path).evaluate(&SessionFixtures::worker()).assert_allowed();
    }
}

#[test]
fn test_policy_most_specific_rule_wins() {
    let policy = AccessPolicy::builder()
        .route("/reports", RouteGuardPolicy::new(["admin", "engineer", "worker"]))
        .route(
            "/reports/finance",
            RouteGuardPolicy::new(["admin"]).with_redirect("/projects"),
        )
        .build()
        .unwrap();

    assert_eq!(policy.rule_for("/reports/finance/q3").unwrap().path, "/reports/finance");
    assert_eq!(policy.rule_for("/reports/daily").unwrap().path, "/reports");

    policy
        .guard_for("/reports/finance")
        .evaluate(&SessionFixtures::engineer())
        .assert_redirect(GuardState::Unauthorized, "/projects");
    policy
        .guard_for("/reports/daily")
        .evaluate(&SessionFixtures::engineer())
        .assert_allowed();
}

#[test]
fn test_policy_rejects_redirect_loop() {
    let result = AccessPolicy::builder()
        .route("/reports", RouteGuardPolicy::new(["admin"]).with_redirect("/ai"))
        .route("/ai", RouteGuardPolicy::new(["admin"]).with_redirect("/reports"))
        .build();
    assert!(matches!(result, Err(GateError::RedirectLoop { .. })));
}

#[test]
fn test_policy_accepts_fallback_into_enclosing_tree() {
    let policy = AccessPolicy::builder()
        .route("/admin", RouteGuardPolicy::new(["admin", "engineer"]))
        .route(
            "/admin/billing",
            RouteGuardPolicy::new(["admin"]).with_redirect("/admin"),
        )
        .build()
        .unwrap();

    policy
        .guard_for("/admin/billing")
        .evaluate(&SessionFixtures::engineer())
        .assert_redirect(GuardState::Unauthorized, "/admin");
    policy.guard_for("/admin").evaluate(&SessionFixtures::engineer()).assert_allowed();

    policy
        .guard_for("/admin/billing")
        .evaluate(&SessionFixtures::worker())
        .assert_redirect(GuardState::Unauthorized, "/admin");
    policy
        .guard_for("/admin")
        .evaluate(&SessionFixtures::worker())
        .assert_redirect(GuardState::Unauthorized, "/");
    policy.guard_for("/").evaluate(&SessionFixtures::worker()).assert_allowed();
}

#[test]
fn test_policy_rejects_cycle_through_enclosing_tree() {
    let result = AccessPolicy::builder()
        .route("/admin", RouteGuardPolicy::new(["admin", "engineer"]).with_redirect("/admin/help"))
        .build();
    assert!(matches!(result, Err(GateError::RedirectLoop { .. })));
}

#[test]
fn test_policy_rejects_empty_roles() {
    let result = AccessPolicy::builder()
        .route("/admin", RouteGuardPolicy::new(Vec::<String>::new()))
        .build();
    assert!(matches!(result, Err(GateError::EmptyAllowedRoles { .. })));
}

#[test]
fn test_policy_admits_matches_guard() {
    let policy = policy();
    for (_, session) in SessionFixtures::authenticated() {
        for path in PathFixtures::ITEMS.iter().chain(PathFixtures::ADMIN_TREE.iter()) {
            assert_eq!(
                policy.admits(&session.role(), path),
                policy.guard_for(path).evaluate(&session).is_allowed(),
                "role '{}' at {}",
                session.role(),
                path
            );
        }
    }
}

// =============================================================================
// Live session signal
// =============================================================================

#[tokio::test]
async fn test_signal_guard_follows_bootstrap() {
    let signal = SessionSignal::new();
    let guard = policy().guard_for("/admin");
    guard.check(&signal).assert_loading();

    let resolver = Arc::new(MockSessionResolver::gated(Ok(SessionFixtures::engineer())));
    let task = {
        let signal = signal.clone();
        let resolver = resolver.clone();
        tokio::spawn(async move { signal.bootstrap(resolver.as_ref()).await })
    };

    tokio::task::yield_now().await;
    guard.check(&signal).assert_loading();

    resolver.release();
    let session = tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.role(), "engineer");
    guard.check(&signal).assert_allowed();
}

#[tokio::test]
async fn test_signal_provider_failure_denies() {
    let signal = SessionSignal::new();
    let resolver = MockSessionResolver::ready(Err(SessionError::provider("token endpoint down")));
    let session = signal.bootstrap(&resolver).await;

    assert!(!session.is_authenticated);
    assert!(!session.loading);
    policy()
        .guard_for("/projects")
        .check(&signal)
        .assert_redirect(GuardState::Unauthenticated, "/auth");
}

#[tokio::test]
async fn test_signal_watcher_sees_sign_out() {
    let signal = SessionSignal::resolved(SessionFixtures::admin());
    let mut watcher = signal.subscribe();

    signal.sign_out();
    let session = tokio::time::timeout(Duration::from_secs(1), watcher.changed())
        .await
        .unwrap()
        .unwrap();

    assert!(!session.is_authenticated);
    policy()
        .guard_for("/admin")
        .evaluate(&session)
        .assert_redirect(GuardState::Unauthenticated, "/auth");
}
