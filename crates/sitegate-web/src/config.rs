// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Web server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use sitegate_config::SiteGateConfig;

/// Markup served while the session is still resolving.
pub const DEFAULT_PLACEHOLDER_HTML: &str = concat!(
    "<!doctype html><html><head><meta charset=\"utf-8\"><title>Loading</title></head>",
    "<body><main class=\"gate-skeleton\" aria-busy=\"true\">",
    "<div class=\"skeleton-nav\"></div><div class=\"skeleton-content\"></div>",
    "</main></body></html>"
);

/// Path prefixes that resolve the session but answer with their own
/// decisions instead of being redirected.
pub const DEFAULT_EXEMPT_PREFIXES: [&str; 1] = ["/api"];

// =============================================================================
// WebConfig
// =============================================================================

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Server host address.
    pub host: IpAddr,
    /// Server port.
    pub port: u16,
    /// Request timeout.
    pub request_timeout: Duration,
    /// Graceful shutdown timeout.
    pub shutdown_timeout: Duration,
    /// Loading placeholder markup.
    pub placeholder_html: String,
    /// Seconds before the placeholder asks the browser to retry.
    pub placeholder_refresh_secs: u64,
    /// Path prefixes exempt from guard enforcement.
    pub exempt_prefixes: Vec<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
            request_timeout: Duration::from_secs(30),
            shutdown_timeout: Duration::from_secs(10),
            placeholder_html: DEFAULT_PLACEHOLDER_HTML.to_string(),
            placeholder_refresh_secs: 1,
            exempt_prefixes: DEFAULT_EXEMPT_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl WebConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Sets the placeholder markup.
    pub fn with_placeholder_html(mut self, html: impl Into<String>) -> Self {
        self.placeholder_html = html.into();
        self
    }
}

impl From<&SiteGateConfig> for WebConfig {
    fn from(config: &SiteGateConfig) -> Self {
        let defaults = WebConfig::default();
        Self {
            host: config.server.host,
            port: config.server.port,
            request_timeout: config.server.request_timeout,
            shutdown_timeout: config.server.shutdown_timeout,
            placeholder_html: config
                .gate
                .placeholder_html
                .clone()
                .unwrap_or(defaults.placeholder_html),
            ..defaults
        }
    }
}
