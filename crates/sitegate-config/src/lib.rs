// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # sitegate-config
//!
//! Configuration management for the SiteGate navigation gate.
//!
//! ## Features
//!
//! - **Schema Definition**: Server, gate, routes, navigation and logging sections
//! - **Multi-Format Support**: YAML, TOML, and JSON configuration files
//! - **Environment Overrides**: `${VAR:default}` placeholders and `SITEGATE_*` overrides
//! - **Validation**: The same checks the gate applies when building its policy table
//!
//! ## Quick Start
//!
//! ```no_run
//! use sitegate_config::loader::load_config;
//!
//! let config = load_config("sitegate.yaml").unwrap();
//! let policy = config.access_policy().unwrap();
//! let catalog = config.catalog().unwrap();
//!
//! println!("{} routes, {} menu items", policy.rules().len(), catalog.len());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, load_config_str, ConfigFormat, ConfigLoader};
pub use schema::{
    GateConfig, LogFormat, LogLevel, LoggingConfig, NavigationConfig, RouteConfig,
    ServerConfig, SiteGateConfig,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
