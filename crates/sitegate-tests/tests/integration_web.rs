// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Web Integration Tests
//!
//! The full router: guard middleware, session sources, the gate and
//! navigation endpoints, and the dashboard shell.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
};
use sitegate_config::{ConfigFormat, ConfigLoader};
use sitegate_tests::prelude::*;
use sitegate_web::{SignalSessionSource, WebConfig, GATE_STATE_HEADER};

fn app() -> axum::Router {
    GateAppBuilder::new().build()
}

fn app_with(source: Arc<MockSessionSource>) -> axum::Router {
    GateAppBuilder::new().session_source(source).build()
}

// =============================================================================
// Header sessions
// =============================================================================

#[tokio::test]
async fn test_anonymous_is_sent_to_auth() {
    init_test_logging();
    let router = app();

    for path in PathFixtures::ITEMS {
        let response = get(&router, path, None).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(response.header("location"), Some("/auth"));
        assert_eq!(response.header(GATE_STATE_HEADER), Some("unauthenticated"));
        assert_eq!(response.header("cache-control"), Some("no-store"));
    }
}

#[tokio::test]
async fn test_worker_is_sent_home_from_admin() {
    let router = app();

    for path in PathFixtures::ADMIN_TREE {
        let response = get(&router, path, Some("worker")).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(response.header("location"), Some("/"));
        assert_eq!(response.header(GATE_STATE_HEADER), Some("unauthorized"));
    }
}

#[tokio::test]
async fn test_worker_shell_shows_restricted_menu() {
    let router = app();
    let response = get(&router, "/reports/daily", Some("worker")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header(GATE_STATE_HEADER), Some("allowed"));
    assert!(response
        .body
        .contains("<a href=\"/reports\" data-icon=\"file-bar-chart\" aria-current=\"page\">Reports</a>"));
    assert!(response.body.contains("href=\"/ai\""));
    assert!(!response.body.contains("href=\"/projects\""));
    assert!(!response.body.contains("href=\"/admin\""));
}

#[tokio::test]
async fn test_engineer_shell_includes_admin() {
    let router = app();
    let response = get(&router, "/admin/users", Some("Engineer")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<h1>Admin</h1>"));
    assert!(response.body.contains("data-role=\"engineer\""));
    for path in PathFixtures::ITEMS {
        assert!(response.body.contains(&format!("href=\"{}\"", path)), "{}", path);
    }
}

#[tokio::test]
async fn test_sibling_of_admin_is_not_guarded() {
    let router = app();
    let response = get(&router, "/administer", Some("worker")).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.header(GATE_STATE_HEADER), Some("allowed"));
}

#[tokio::test]
async fn test_public_paths_render_for_anonymous() {
    let router = app();

    let response = get(&router, "/auth", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Sign in to continue."));

    let response = get(&router, "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");
}

#[tokio::test]
async fn test_unreadable_identity_header_is_anonymous() {
    let router = app();
    let request = Request::builder()
        .uri("/projects")
        .header("x-auth-user", HeaderValue::from_bytes(b"\xff\xfe").unwrap())
        .header("x-auth-role", "admin")
        .body(Body::empty())
        .unwrap();

    let response = send(&router, request).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), Some("/auth"));
}

// =============================================================================
// Loading placeholder
// =============================================================================

#[tokio::test]
async fn test_loading_session_gets_placeholder() {
    let source = Arc::new(MockSessionSource::new(SessionFixtures::loading()));
    let router = app_with(source.clone());

    for path in ["/", "/projects", "/admin/users"] {
        let response = get(&router, path, None).await;
        assert_eq!(response.status, StatusCode::OK, "{}", path);
        assert_eq!(response.header(GATE_STATE_HEADER), Some("loading"));
        assert_eq!(response.header("cache-control"), Some("no-store"));
        assert_eq!(response.header("refresh"), Some("1"));
        assert!(response.body.contains("gate-skeleton"));
        assert!(response.header("location").is_none());
    }
    assert_eq!(source.call_count(), 3);
}

#[tokio::test]
async fn test_custom_placeholder_markup() {
    let source = Arc::new(MockSessionSource::new(SessionFixtures::loading()));
    let router = GateAppBuilder::new()
        .session_source(source)
        .web_config(WebConfig::default().with_placeholder_html("<p>Checking access</p>"))
        .build();

    let response = get(&router, "/tasks", None).await;
    assert_eq!(response.body, "<p>Checking access</p>");
}

#[tokio::test]
async fn test_loading_session_on_public_path_renders() {
    let source = Arc::new(MockSessionSource::new(SessionFixtures::loading()));
    let router = app_with(source);

    let response = get(&router, "/auth", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header(GATE_STATE_HEADER), Some("allowed"));
}

// =============================================================================
// Session source failures and changes
// =============================================================================

#[tokio::test]
async fn test_failing_source_is_unauthenticated() {
    let source = Arc::new(MockSessionSource::failing("identity provider timeout"));
    let router = app_with(source.clone());

    let response = get(&router, "/projects", Some("admin")).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), Some("/auth"));
    assert_eq!(source.call_count(), 1);
}

#[tokio::test]
async fn test_source_changes_take_effect_per_request() {
    let source = Arc::new(MockSessionSource::new(SessionFixtures::anonymous()));
    let router = app_with(source.clone());

    assert_eq!(get(&router, "/admin", None).await.status, StatusCode::SEE_OTHER);

    source.set(Ok(SessionBuilder::new().role("admin").name("Robin").build()));
    let response = get(&router, "/admin", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header(GATE_STATE_HEADER), Some("allowed"));

    source.set(Ok(SessionFixtures::worker()));
    let response = get(&router, "/admin", None).await;
    assert_eq!(response.header("location"), Some("/"));
}

#[tokio::test]
async fn test_signal_source_follows_provider() {
    let signal = SessionSignal::new();
    let router = GateAppBuilder::new()
        .session_source(Arc::new(SignalSessionSource::new(signal.clone())))
        .build();

    let response = get(&router, "/ai", None).await;
    assert_eq!(response.header(GATE_STATE_HEADER), Some("loading"));

    signal.resolve(Ok(SessionFixtures::worker()));
    let response = get(&router, "/ai", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header(GATE_STATE_HEADER), Some("allowed"));

    signal.sign_out();
    let response = get(&router, "/ai", None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), Some("/auth"));
}

// =============================================================================
// API endpoints
// =============================================================================

#[tokio::test]
async fn test_api_is_exempt_from_redirects() {
    let router = app();

    let response = get(&router, "/api/navigation", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header(GATE_STATE_HEADER), Some("exempt"));

    let body = response.json();
    assert_eq!(body["authenticated"], false);
    assert_eq!(body["role"], "");
    let paths: Vec<_> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["path"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(paths, vec!["/", "/projects", "/tasks", "/materials", "/reports", "/ai"]);
}

#[tokio::test]
async fn test_navigation_reports_loading() {
    let source = Arc::new(MockSessionSource::new(SessionFixtures::loading()));
    let router = app_with(source);

    let body = get(&router, "/api/navigation", None).await.json();
    assert_eq!(body["loading"], true);
    assert_eq!(body["authenticated"], false);
}

#[tokio::test]
async fn test_navigation_marks_active_entry() {
    let router = app();
    let body = get(&router, "/api/navigation?current=/projects/7", Some("admin"))
        .await
        .json();

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 7);
    let active: Vec<_> = items
        .iter()
        .filter(|item| item["active"] == true)
        .map(|item| item["path"].as_str().unwrap())
        .collect();
    assert_eq!(active, vec!["/projects"]);
    assert_eq!(items[1]["icon_id"], "folder-kanban");
}

#[tokio::test]
async fn test_gate_endpoint_decisions() {
    let router = app();

    let body = get(&router, "/api/gate?path=/admin/users", None).await.json();
    assert_eq!(body["path"], "/admin/users");
    assert_eq!(body["protected"], true);
    assert_eq!(body["state"], "unauthenticated");
    assert_eq!(body["outcome"]["kind"], "redirect");
    assert_eq!(body["outcome"]["target_path"], "/auth");
    assert_eq!(body["outcome"]["replace"], true);

    let body = get(&router, "/api/gate?path=/auth/callback", None).await.json();
    assert_eq!(body["protected"], false);
    assert_eq!(body["state"], "allowed");
    assert_eq!(body["outcome"]["kind"], "render");

    let body = get(&router, "/api/gate?path=/admin", Some("admin")).await.json();
    assert_eq!(body["state"], "allowed");
}

#[tokio::test]
async fn test_gate_endpoint_placeholder() {
    let source = Arc::new(MockSessionSource::new(SessionFixtures::loading()));
    let router = app_with(source);

    let body = get(&router, "/api/gate?path=/projects", None).await.json();
    assert_eq!(body["state"], "loading");
    assert_eq!(body["outcome"]["kind"], "placeholder");
}

#[tokio::test]
async fn test_gate_endpoint_rejects_bad_paths() {
    let router = app();

    for uri in ["/api/gate", "/api/gate?path=", "/api/gate?path=reports"] {
        let response = get(&router, uri, Some("admin")).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(response.json()["error"]["code"], "BAD_REQUEST");
    }
}

// =============================================================================
// Configured gate
// =============================================================================

#[tokio::test]
async fn test_configured_finance_tree() {
    let config = ConfigLoader::new()
        .with_env_vars(false)
        .load_from_str(ConfigFixtures::finance_toml(), ConfigFormat::Toml)
        .unwrap();
    let router = GateAppBuilder::new().config(config).build();

    let response = get(&router, "/reports/finance", Some("engineer")).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), Some("/reports"));

    let response = get(&router, "/reports/finance", Some("admin")).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = get(&router, "/api/navigation", Some("engineer")).await.json();
    assert_eq!(body["transition"], "immediate");
}

#[tokio::test]
async fn test_redirect_location_is_header_safe() {
    let router = app();
    let response = get(&router, "/tasks", None).await;

    let location = response.headers.get(header::LOCATION).unwrap();
    assert_eq!(location, "/auth");
}
