// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # sitegate-web
//!
//! HTTP routing boundary for the SiteGate navigation gate.
//!
//! Every request passes through [`GuardLayer`](middleware::GuardLayer),
//! which resolves the session, asks the shared policy table for the guard of
//! the requested path and either renders, serves a loading placeholder or
//! redirects. Client routers can ask for the same decisions through
//! `/api/gate` and for the visible menu through `/api/navigation`.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod session_source;
pub mod state;

pub use config::WebConfig;
pub use context::{GateContext, GateSession};
pub use error::{ApiError, ApiResult};
pub use middleware::{GuardLayer, GuardMiddleware, GATE_STATE_HEADER};
pub use server::WebServer;
pub use session_source::{HeaderSessionSource, SessionSource, SignalSessionSource};
pub use state::{AppState, AppStateBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
