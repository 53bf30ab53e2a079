// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # sitegate-bin
//!
//! CLI binary for the SiteGate navigation gate.
//!
//! - CLI argument parsing with clap
//! - Server runtime and graceful shutdown
//! - Logging initialization
//! - Offline commands for checking configuration, menus and guard decisions
//!
//! ## Architecture
//!
//! ```text
//!                  main.rs
//!                     │
//!                  cli.rs
//!                     │
//!         ┌───────────┼───────────┐
//!         ▼           ▼           ▼
//!     commands     runtime     logging
//!         │           │
//!         │       shutdown
//!         ▼
//!   sitegate-{core,config,web}
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the server (default command)
//! sitegate
//!
//! # Start with a custom config
//! sitegate -c /etc/sitegate/sitegate.yaml
//!
//! # What does a worker see?
//! sitegate nav --role worker
//!
//! # Would an engineer get into /admin?
//! sitegate check --path /admin --role engineer
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod shutdown;

// =============================================================================
// Re-exports
// =============================================================================

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;
pub use runtime::{GateRuntime, RuntimeBuilder};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
