// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Server runtime orchestration.
//!
//! Loads configuration, builds the shared policy and catalog, runs the web
//! server and coordinates graceful shutdown.

use std::path::{Path, PathBuf};

use sitegate_config::{ConfigLoader, SiteGateConfig};
use sitegate_web::{AppState, WebServer};
use tracing::{info, warn};

use crate::error::{BinError, BinResult};
use crate::shutdown::ShutdownCoordinator;

// =============================================================================
// GateRuntime
// =============================================================================

/// The server runtime.
pub struct GateRuntime {
    config: SiteGateConfig,
    shutdown: ShutdownCoordinator,
}

impl GateRuntime {
    /// Creates a runtime for a loaded configuration.
    pub fn new(config: SiteGateConfig) -> Self {
        Self {
            config,
            shutdown: ShutdownCoordinator::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SiteGateConfig {
        &self.config
    }

    /// Returns the shutdown coordinator.
    pub fn shutdown(&self) -> &ShutdownCoordinator {
        &self.shutdown
    }

    /// Runs the server until shutdown is signaled.
    pub async fn run(self) -> BinResult<()> {
        info!("Starting SiteGate v{}", sitegate_core::VERSION);

        for warning in self.config.warnings() {
            warn!("{}", warning);
        }

        let state = AppState::from_config(&self.config)
            .map_err(|e| BinError::startup(e.to_string()))?;
        info!(
            routes = state.policy.rules().len(),
            navigation_items = state.catalog.len(),
            transition = ?state.transition,
            "Gate initialized"
        );

        let server = WebServer::new(state);
        let signal = self.shutdown.shutdown_signal();
        let mut server_task = tokio::spawn(server.run_with_shutdown(signal.wait()));

        tokio::select! {
            joined = &mut server_task => {
                return flatten(joined);
            }
            _ = self.shutdown.wait_for_shutdown() => {}
        }

        let grace = self.config.server.shutdown_timeout;
        match tokio::time::timeout(grace, server_task).await {
            Ok(joined) => flatten(joined),
            Err(_) => {
                warn!(timeout = ?grace, "Graceful shutdown timed out, dropping open connections");
                Ok(())
            }
        }
    }
}

fn flatten(
    joined: Result<sitegate_web::ApiResult<()>, tokio::task::JoinError>,
) -> BinResult<()> {
    match joined {
        Ok(result) => result.map_err(BinError::from),
        Err(e) => Err(BinError::runtime(format!("Server task failed: {}", e))),
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for [`GateRuntime`].
#[derive(Debug, Default)]
pub struct RuntimeBuilder {
    config_path: Option<PathBuf>,
    port: Option<u16>,
}

impl RuntimeBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration file. Built-in defaults are used without one.
    pub fn config_path(mut self, path: Option<&Path>) -> Self {
        self.config_path = path.map(Path::to_path_buf);
        self
    }

    /// Overrides the configured port.
    pub fn port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    /// Loads the configuration and builds the runtime.
    pub fn build(self) -> BinResult<GateRuntime> {
        let mut config = ConfigLoader::new().load_or_default(self.config_path.as_deref())?;

        if let Some(port) = self.port {
            config.server.port = port;
            config.validate()?;
        }

        Ok(GateRuntime::new(config))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builder_defaults() {
        let runtime = RuntimeBuilder::new().build().unwrap();
        assert_eq!(runtime.config().server.port, 8080);
        assert!(!runtime.shutdown().is_shutdown_initiated());
    }

    #[test]
    fn test_builder_port_override() {
        let runtime = RuntimeBuilder::new().port(Some(9443)).build().unwrap();
        assert_eq!(runtime.config().server.port, 9443);
    }

    #[test]
    fn test_builder_reads_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "server:\n  port: 7000").unwrap();

        let runtime = RuntimeBuilder::new()
            .config_path(Some(file.path()))
            .build()
            .unwrap();
        assert_eq!(runtime.config().server.port, 7000);
    }

    #[test]
    fn test_builder_missing_file() {
        let result = RuntimeBuilder::new()
            .config_path(Some(Path::new("/nonexistent/sitegate.yaml")))
            .build();
        assert!(matches!(result, Err(BinError::Config(_))));
    }
}
