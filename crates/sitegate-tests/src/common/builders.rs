// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Builders
//!
//! Builders for sessions and fully wired routers.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sitegate_config::SiteGateConfig;
use sitegate_core::{Session, User};
use sitegate_web::{AppState, SessionSource, WebConfig, WebServer};
use tower::ServiceExt;

// =============================================================================
// Session Builder
// =============================================================================

/// Builder for sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    role: Option<String>,
    id: Option<String>,
    name: Option<String>,
    email: Option<String>,
    loading: bool,
}

impl SessionBuilder {
    /// Create a new builder. Without a role the session is anonymous.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role; makes the session authenticated.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the user ID.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Mark the session as still resolving.
    pub fn loading(mut self) -> Self {
        self.loading = true;
        self
    }

    /// Build the session.
    pub fn build(self) -> Session {
        if self.loading {
            return Session::loading();
        }
        let Some(role) = self.role else {
            return Session::anonymous();
        };

        let mut user = User::new(role).with_id(self.id.unwrap_or_else(|| "user-1".to_string()));
        if let Some(name) = self.name {
            user = user.with_name(name);
        }
        if let Some(email) = self.email {
            user = user.with_email(email);
        }
        Session::authenticated(user)
    }
}

// =============================================================================
// App Builder
// =============================================================================

/// Builder for a fully wired router.
#[derive(Default)]
pub struct GateAppBuilder {
    config: Option<SiteGateConfig>,
    source: Option<Arc<dyn SessionSource>>,
    web: Option<WebConfig>,
}

impl GateAppBuilder {
    /// Create a builder over the built-in configuration and header sessions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a loaded configuration.
    pub fn config(mut self, config: SiteGateConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a session source.
    pub fn session_source(mut self, source: Arc<dyn SessionSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Override the web settings derived from the configuration.
    pub fn web_config(mut self, web: WebConfig) -> Self {
        self.web = Some(web);
        self
    }

    /// Build the application state.
    pub fn state(self) -> AppState {
        let config = self.config.unwrap_or_default();
        let mut builder = AppState::builder()
            .config(self.web.unwrap_or_else(|| WebConfig::from(&config)))
            .policy(Arc::new(config.access_policy().expect("valid policy")))
            .catalog(Arc::new(config.catalog().expect("valid catalog")))
            .transition(config.gate.transition);
        if let Some(source) = self.source {
            builder = builder.session_source(source);
        }
        builder.build().expect("valid app state")
    }

    /// Build the router.
    pub fn build(self) -> Router {
        WebServer::new(self.state()).router()
    }
}

// =============================================================================
// HTTP helpers
// =============================================================================

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Body as text.
    pub body: String,
}

impl TestResponse {
    /// Returns a header as text, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

/// Sends a GET request, optionally with proxy identity headers.
pub async fn get(router: &Router, uri: &str, role: Option<&str>) -> TestResponse {
    let mut request = Request::builder().uri(uri);
    if let Some(role) = role {
        request = request
            .header("x-auth-user", format!("user-{}", role))
            .header("x-auth-role", role);
    }
    send(router, request.body(Body::empty()).expect("valid request")).await
}

/// Sends a request through a clone of the router.
pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}
