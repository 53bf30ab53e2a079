// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema definitions for SiteGate.
//!
//! # Schema Structure
//!
//! ```text
//! SiteGateConfig
//! ├── server: ServerConfig
//! ├── gate: GateConfig
//! ├── routes: Vec<RouteConfig>
//! ├── public_paths: Vec<String>
//! ├── navigation: NavigationConfig
//! └── logging: LoggingConfig
//! ```
//!
//! Every section has a default, so an empty file yields the built-in
//! construction dashboard.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sitegate_core::{
    AccessPolicy, NavigationCatalog, NavigationItem, Role, RouteGuardPolicy, TransitionMode,
    ADMIN_PATH, AUTH_PATH, DEFAULT_REDIRECT, HEALTH_PATH,
};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Constants
// =============================================================================

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default graceful shutdown timeout.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Top-Level Configuration
// =============================================================================

/// The root configuration structure for SiteGate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteGateConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Gate behavior.
    #[serde(default)]
    pub gate: GateConfig,

    /// Guarded route trees.
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,

    /// Paths that need no session.
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,

    /// Navigation catalog.
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SiteGateConfig {
    /// Validates the entire configuration.
    ///
    /// Route and catalog checks are the ones the gate itself enforces when the
    /// policy table and catalog are built.
    pub fn validate(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.gate.validate()?;

        for (i, route) in self.routes.iter().enumerate() {
            if route.allowed_roles.iter().all(|r| r.trim().is_empty()) {
                return Err(ConfigError::validation(
                    format!("routes[{}].allowed_roles", i),
                    format!("route '{}' must allow at least one role", route.path),
                ));
            }
        }

        self.access_policy()?;
        self.catalog()?;
        Ok(())
    }

    /// Builds the shared role-policy table.
    pub fn access_policy(&self) -> ConfigResult<AccessPolicy> {
        let mut builder = AccessPolicy::builder().auth_path(&self.gate.auth_path);
        for path in &self.public_paths {
            builder = builder.public(path);
        }
        for route in &self.routes {
            let redirect = route
                .redirect_to
                .clone()
                .unwrap_or_else(|| self.gate.default_redirect.clone());
            builder = builder.route(
                &route.path,
                RouteGuardPolicy::new(&route.allowed_roles).with_redirect(redirect),
            );
        }
        builder.build().map_err(|e| ConfigError::gate("routes", e))
    }

    /// Builds the navigation catalog.
    pub fn catalog(&self) -> ConfigResult<NavigationCatalog> {
        let nav = &self.navigation;
        let mut builder = NavigationCatalog::builder()
            .items(nav.items.iter().cloned())
            .restricted_role(&nav.restricted_role);
        for path in nav.restricted_paths() {
            builder = builder.restrict(path);
        }
        builder.build().map_err(|e| ConfigError::gate("navigation", e))
    }

    /// Returns non-fatal findings, reported by strict validation.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (i, route) in self.routes.iter().enumerate() {
            for role in &route.allowed_roles {
                if Role::parse(role).is_none() {
                    warnings.push(format!(
                        "routes[{}].allowed_roles: '{}' is not a recognized role",
                        i, role
                    ));
                }
            }
        }

        if Role::parse(&self.navigation.restricted_role).is_none() {
            warnings.push(format!(
                "navigation.restricted_role: '{}' is not a recognized role",
                self.navigation.restricted_role
            ));
        }

        if let Ok(policy) = self.access_policy() {
            for item in &self.navigation.items {
                let reachable = Role::RECOGNIZED
                    .iter()
                    .any(|role| policy.admits(role.as_str(), &item.path));
                if !reachable {
                    warnings.push(format!(
                        "navigation item '{}' ({}) is hidden from every recognized role",
                        item.name, item.path
                    ));
                }
            }
        }

        warnings
    }
}

impl Default for SiteGateConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            gate: GateConfig::default(),
            routes: default_routes(),
            public_paths: default_public_paths(),
            navigation: NavigationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_routes() -> Vec<RouteConfig> {
    vec![RouteConfig {
        path: ADMIN_PATH.to_string(),
        allowed_roles: vec![
            Role::Admin.as_str().to_string(),
            Role::Engineer.as_str().to_string(),
        ],
        redirect_to: None,
    }]
}

fn default_public_paths() -> Vec<String> {
    vec![AUTH_PATH.to_string(), HEALTH_PATH.to_string()]
}

// =============================================================================
// Server Configuration
// =============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout.
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Time allowed for in-flight requests on shutdown.
    #[serde(default = "default_shutdown_timeout", with = "humantime_serde")]
    pub shutdown_timeout: Duration,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0))
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_shutdown_timeout() -> Duration {
    DEFAULT_SHUTDOWN_TIMEOUT
}

impl ServerConfig {
    /// Validates the server configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.request_timeout.is_zero() {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "cannot be zero",
            ));
        }
        Ok(())
    }

    /// Returns the socket address.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

// =============================================================================
// Gate Configuration
// =============================================================================

/// Gate behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Entry path for unauthenticated sessions.
    #[serde(default = "default_auth_path")]
    pub auth_path: String,

    /// Fallback for routes that do not name their own.
    #[serde(default = "default_redirect")]
    pub default_redirect: String,

    /// Transition mode for client navigation.
    #[serde(default)]
    pub transition: TransitionMode,

    /// Markup served while the session is loading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_html: Option<String>,
}

fn default_auth_path() -> String {
    AUTH_PATH.to_string()
}

fn default_redirect() -> String {
    DEFAULT_REDIRECT.to_string()
}

impl GateConfig {
    /// Validates the gate configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.auth_path.starts_with('/') {
            return Err(ConfigError::validation("gate.auth_path", "must start with '/'"));
        }
        if !self.default_redirect.starts_with('/') {
            return Err(ConfigError::validation(
                "gate.default_redirect",
                "must start with '/'",
            ));
        }
        Ok(())
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            auth_path: default_auth_path(),
            default_redirect: default_redirect(),
            transition: TransitionMode::default(),
            placeholder_html: None,
        }
    }
}

// =============================================================================
// Route Configuration
// =============================================================================

/// A guarded route tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// Root of the tree.
    pub path: String,

    /// Roles admitted into the tree.
    pub allowed_roles: Vec<String>,

    /// Fallback for denied roles; `gate.default_redirect` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

// =============================================================================
// Navigation Configuration
// =============================================================================

/// Navigation catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavigationConfig {
    /// Role that receives the restricted tier.
    #[serde(default = "default_restricted_role")]
    pub restricted_role: String,

    /// Default catalog, in menu order.
    #[serde(default = "default_items")]
    pub items: Vec<NavigationItem>,

    /// Paths of the restricted tier. When absent, the built-in restricted
    /// paths that appear in `items`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restricted: Option<Vec<String>>,
}

fn default_restricted_role() -> String {
    Role::Worker.as_str().to_string()
}

fn default_items() -> Vec<NavigationItem> {
    NavigationCatalog::construction_dashboard().items().to_vec()
}

impl NavigationConfig {
    /// Returns the effective restricted paths.
    pub fn restricted_paths(&self) -> Vec<String> {
        match &self.restricted {
            Some(paths) => paths.clone(),
            None => NavigationCatalog::construction_dashboard()
                .restricted()
                .iter()
                .filter(|r| self.items.iter().any(|i| i.path == r.path))
                .map(|r| r.path.clone())
                .collect(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            restricted_role: default_restricted_role(),
            items: default_items(),
            restricted: None,
        }
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Returns the filter directive for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parses a level name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Single-line compact text.
    Compact,
    /// JSON for log aggregation.
    Json,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_construction_dashboard() {
        let config = SiteGateConfig::default();
        assert!(config.validate().is_ok());

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog, NavigationCatalog::construction_dashboard());

        let policy = config.access_policy().unwrap();
        assert!(policy.is_public("/health"));
        assert!(policy.admits("engineer", "/admin"));
        assert!(!policy.admits("worker", "/admin"));
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_route_without_roles_rejected() {
        let mut config = SiteGateConfig::default();
        config.routes[0].allowed_roles = vec![" ".to_string()];
        match config.validate() {
            Err(ConfigError::Validation { field, .. }) => {
                assert_eq!(field, "routes[0].allowed_roles")
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_restricted_must_be_subset() {
        let mut config = SiteGateConfig::default();
        config.navigation.restricted = Some(vec!["/timesheets".to_string()]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "navigation"
        ));
    }

    #[test]
    fn test_restricted_defaults_follow_items() {
        let mut config = SiteGateConfig::default();
        config.navigation.items = vec![
            NavigationItem::new("Home", "home", "/"),
            NavigationItem::new("AI", "bot", "/ai"),
        ];
        assert_eq!(config.navigation.restricted_paths(), vec!["/ai"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_route_redirect_falls_back_to_gate_default() {
        let mut config = SiteGateConfig::default();
        config.gate.default_redirect = "/projects".to_string();
        let policy = config.access_policy().unwrap();
        let rule = policy.rule_for("/admin").unwrap();
        assert_eq!(rule.policy.redirect_to(), "/projects");
    }

    #[test]
    fn test_warnings_for_unknown_roles() {
        let mut config = SiteGateConfig::default();
        config.routes[0].allowed_roles = vec!["auditor".to_string()];
        let warnings = config.warnings();
        assert!(warnings.iter().any(|w| w.contains("'auditor'")));
        assert!(warnings.iter().any(|w| w.contains("Admin")));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = SiteGateConfig::default();
        config.server.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("loud"), None);
    }
}
