// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # sitegate-core
//!
//! Navigation authorization gate for the SiteGate construction dashboard.
//!
//! This crate provides the pieces every SiteGate surface shares:
//!
//! - **Session**: Session snapshot, provider traits, watch-backed signal
//! - **Role**: Role normalization and classification
//! - **Policy**: The single role-policy table for routes
//! - **Guard**: Route guard state machine and decisions
//! - **Catalog**: Navigation catalog with its restricted tier
//! - **Visibility**: Role-based menu filtering derived from the policy table
//! - **Transition**: Animated/immediate navigator with guaranteed fallback
//! - **Link**: Transition-aware link click handling
//!
//! ## Example
//!
//! ```rust
//! use sitegate_core::{AccessPolicy, Session, User, VisibilityFilter};
//!
//! let policy = AccessPolicy::construction_dashboard();
//! let session = Session::authenticated(User::new("worker"));
//!
//! let decision = policy.guard_for("/admin").evaluate(&session);
//! assert_eq!(decision.redirect_target(), Some("/"));
//!
//! let menu = VisibilityFilter::default().visible_for(&session.role());
//! assert_eq!(menu.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Core Modules
// =============================================================================

pub mod error;
pub mod path;
pub mod role;
pub mod session;

// =============================================================================
// Access Modules
// =============================================================================

pub mod policy;
pub mod guard;
pub mod catalog;
pub mod visibility;

// =============================================================================
// Navigation Modules
// =============================================================================

pub mod transition;
pub mod link;

// =============================================================================
// Re-exports for convenience
// =============================================================================

pub use error::{GateError, GateResult, SessionError, TransitionError};
pub use role::{normalize_role, Role};
pub use session::{
    Session, SessionProvider, SessionResolver, SessionSignal, SessionWatcher, User,
};

pub use policy::{
    AccessPolicy, AccessPolicyBuilder, RouteGuardPolicy, RouteRule, ADMIN_PATH, AUTH_PATH,
    DEFAULT_REDIRECT, HEALTH_PATH,
};
pub use guard::{GuardDecision, GuardOutcome, GuardState, RouteGuard};
pub use catalog::{NavigationCatalog, NavigationCatalogBuilder, NavigationItem};
pub use visibility::{visible_items, VisibilityFilter};

pub use transition::{
    select_transition, AnimatedTransition, HistoryRouter, ImmediateTransition, MemoryHistory,
    PendingUpdate, TransitionHost, TransitionMode, TransitionNavigator, TransitionOutcome,
    TransitionRequest, ViewTransition,
};
pub use link::{ClickEvent, ClickOutcome, Link, Modifiers, MouseButton};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
