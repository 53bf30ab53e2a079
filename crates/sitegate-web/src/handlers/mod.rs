// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Handlers for all endpoints.
//!
//! - [`health`]: liveness check
//! - [`navigation`]: visible menu for the request's session
//! - [`gate`]: guard decision for a path, for client routers
//! - [`shell`]: dashboard shell for guarded pages

mod gate;
mod health;
mod navigation;
mod shell;

pub use gate::*;
pub use health::*;
pub use navigation::*;
pub use shell::*;
