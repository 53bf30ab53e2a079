// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # SiteGate Integration Tests
//!
//! Test utilities and integration suites for the SiteGate workspace.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities
//!   - `fixtures`: Sessions, paths and configuration documents
//!   - `builders`: Sessions and routers with sensible defaults
//!   - `assertions`: Assertions on guard decisions and menus
//!   - `mocks`: Transition hosts, history routers and session sources
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sitegate-tests
//! cargo test -p sitegate-tests --test integration_guard
//! cargo test -p sitegate-tests --test integration_web -- --nocapture
//! ```
//!
//! ## Writing New Tests
//!
//! ```rust,ignore
//! use sitegate_tests::prelude::*;
//!
//! #[test]
//! fn test_something() {
//!     let policy = AccessPolicy::construction_dashboard();
//!     policy
//!         .guard_for("/admin")
//!         .evaluate(&SessionFixtures::worker())
//!         .assert_redirect(GuardState::Unauthorized, "/");
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::assertions::*;
    pub use crate::common::builders::*;
    pub use crate::common::fixtures::*;
    pub use crate::common::mocks::*;
    pub use crate::common::{init_test_logging, write_config};
    pub use sitegate_core::*;
}
