// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Middleware implementations for the web server.
//!
//! - [`GuardLayer`]: route guard enforcement

mod guard;

pub use guard::{GuardLayer, GuardMiddleware, GATE_STATE_HEADER};
