// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Web server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::config::WebConfig;
use crate::error::{ApiError, ApiResult};
use crate::handlers;
use crate::middleware::GuardLayer;
use crate::state::AppState;

// =============================================================================
// WebServer
// =============================================================================

/// The SiteGate web server.
pub struct WebServer {
    state: AppState,
    config: Arc<WebConfig>,
}

impl WebServer {
    /// Creates a new web server with the given state.
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        Self { state, config }
    }

    /// Creates the router with all routes and middleware.
    pub fn router(&self) -> Router {
        let guard = GuardLayer::new(self.state.policy.clone(), self.state.session_source.clone())
            .with_config(&self.config);

        let middleware_stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                self.config.request_timeout,
            ))
            .layer(guard);

        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/navigation", get(handlers::navigation))
            .route("/api/gate", get(handlers::gate))
            .fallback(handlers::shell)
            .layer(middleware_stack)
            .with_state(self.state.clone())
    }

    /// Runs the server until `shutdown_signal` completes.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let router = self.router();

        info!("Starting SiteGate on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to bind {}: {}", addr, e)))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("SiteGate shutdown complete");
        Ok(())
    }

    /// Returns the server address.
    pub fn addr(&self) -> SocketAddr {
        self.config.socket_addr()
    }
}

// =============================================================================
// Tests
// =============================================================================
