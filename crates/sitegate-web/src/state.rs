// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use sitegate_config::SiteGateConfig;
use sitegate_core::{AccessPolicy, NavigationCatalog, TransitionMode, VisibilityFilter};

use crate::config::WebConfig;
use crate::error::ApiResult;
use crate::session_source::{HeaderSessionSource, SessionSource};

// =============================================================================
// AppState
// =============================================================================

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Web configuration.
    pub config: Arc<WebConfig>,
    /// The shared role-policy table.
    pub policy: Arc<AccessPolicy>,
    /// The navigation catalog.
    pub catalog: Arc<NavigationCatalog>,
    /// Session source for the guard middleware.
    pub session_source: Arc<dyn SessionSource>,
    /// Transition mode advertised to client routers.
    pub transition: TransitionMode,
}

impl AppState {
    /// Creates a new app state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Builds state from a loaded configuration with header sessions.
    pub fn from_config(config: &SiteGateConfig) -> ApiResult<Self> {
        AppState::builder()
            .config(WebConfig::from(config))
            .policy(Arc::new(config.access_policy()?))
            .catalog(Arc::new(config.catalog()?))
            .transition(config.gate.transition)
            .build()
    }

    /// Returns the visibility filter over this state's catalog and policy.
    pub fn visibility(&self) -> VisibilityFilter {
        VisibilityFilter::new(self.catalog.clone(), self.policy.clone())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("routes", &self.policy.rules().len())
            .field("navigation_items", &self.catalog.len())
            .field("transition", &self.transition)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing AppState.
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<WebConfig>,
    policy: Option<Arc<AccessPolicy>>,
    catalog: Option<Arc<NavigationCatalog>>,
    session_source: Option<Arc<dyn SessionSource>>,
    transition: Option<TransitionMode>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: WebConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the policy table.
    pub fn policy(mut self, policy: Arc<AccessPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Sets the navigation catalog.
    pub fn catalog(mut self, catalog: Arc<NavigationCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Sets the session source.
    pub fn session_source(mut self, source: Arc<dyn SessionSource>) -> Self {
        self.session_source = Some(source);
        self
    }

    /// Sets the transition mode.
    pub fn transition(mut self, mode: TransitionMode) -> Self {
        self.transition = Some(mode);
        self
    }

    /// Builds the AppState.
    ///
    /// Missing parts fall back to the built-in construction dashboard and
    /// header-based sessions.
    pub fn build(self) -> ApiResult<AppState> {
        Ok(AppState {
            config: Arc::new(self.config.unwrap_or_default()),
            policy: self
                .policy
                .unwrap_or_else(|| Arc::new(AccessPolicy::construction_dashboard())),
            catalog: self
                .catalog
                .unwrap_or_else(|| Arc::new(NavigationCatalog::construction_dashboard())),
            session_source: self
                .session_source
                .unwrap_or_else(|| Arc::new(HeaderSessionSource::new())),
            transition: self.transition.unwrap_or_default(),
        })
    }
}

// =============================================================================
// FromRef implementations for extracting parts of state
// =============================================================================

impl axum::extract::FromRef<AppState> for Arc<AccessPolicy> {
    fn from_ref(state: &AppState) -> Self {
        state.policy.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<NavigationCatalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<WebConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================
