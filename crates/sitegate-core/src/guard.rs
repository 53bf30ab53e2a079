// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Route guard.
//!
//! A [`RouteGuard`] turns a [`Session`] into one of three outcomes: render
//! the guarded content, render a placeholder, or redirect. Evaluation is a
//! pure function of the session and the attached policy; it is re-run on
//! every session change.
//!
//! ```text
//!            loading
//!   ┌──────────────────────┐
//!   │        Loading       │ ── placeholder, no decision
//!   └──────────┬───────────┘
//!              │ session resolved
//!     ┌────────┼─────────────────┐
//!     ▼        ▼                 ▼
//! Unauthenticated  Unauthorized    Allowed
//!  → /auth       → redirect_to    → render
//! ```

use serde::Serialize;

use crate::policy::{RouteGuardPolicy, AUTH_PATH};
use crate::session::{Session, SessionProvider};
use crate::transition::TransitionRequest;

// =============================================================================
// Decision types
// =============================================================================

/// Authorization state of a guarded route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    /// The session is still resolving.
    Loading,
    /// No valid session.
    Unauthenticated,
    /// Valid session, insufficient role.
    Unauthorized,
    /// Access granted.
    Allowed,
}

impl GuardState {
    /// Returns the state name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardState::Loading => "loading",
            GuardState::Unauthenticated => "unauthenticated",
            GuardState::Unauthorized => "unauthorized",
            GuardState::Allowed => "allowed",
        }
    }
}

impl std::fmt::Display for GuardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the routing boundary should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuardOutcome {
    /// Render the guarded content unchanged.
    Render,
    /// Render a neutral placeholder and wait for the session.
    Placeholder,
    /// Navigate away, replacing the current history entry.
    Redirect(TransitionRequest),
}

/// A guard evaluation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardDecision {
    /// The authorization state.
    pub state: GuardState,
    /// The action for the routing boundary.
    pub outcome: GuardOutcome,
}

impl GuardDecision {
    fn loading() -> Self {
        Self {
            state: GuardState::Loading,
            outcome: GuardOutcome::Placeholder,
        }
    }

    fn allowed() -> Self {
        Self {
            state: GuardState::Allowed,
            outcome: GuardOutcome::Render,
        }
    }

    fn redirect(state: GuardState, to: &str) -> Self {
        Self {
            state,
            outcome: GuardOutcome::Redirect(TransitionRequest::replace(to)),
        }
    }

    /// Returns `true` if the guarded content should render.
    pub fn is_allowed(&self) -> bool {
        matches!(self.outcome, GuardOutcome::Render)
    }

    /// Returns the redirect target, if any.
    pub fn redirect_target(&self) -> Option<&str> {
        match &self.outcome {
            GuardOutcome::Redirect(request) => Some(request.target_path.as_str()),
            _ => None,
        }
    }
}

// =============================================================================
// RouteGuard
// =============================================================================

/// Guard for a protected route subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    auth_path: String,
    policy: Option<RouteGuardPolicy>,
    protected: bool,
}

impl RouteGuard {
    /// Creates a guard that requires authentication only.
    pub fn new(auth_path: impl Into<String>) -> Self {
        Self {
            auth_path: auth_path.into(),
            policy: None,
            protected: true,
        }
    }

    /// Creates a guard for a public route; it always renders.
    pub fn public() -> Self {
        Self {
            auth_path: AUTH_PATH.to_string(),
            policy: None,
            protected: false,
        }
    }

    /// Attaches a role policy.
    pub fn with_policy(mut self, policy: RouteGuardPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Returns the attached policy.
    pub fn policy(&self) -> Option<&RouteGuardPolicy> {
        self.policy.as_ref()
    }

    /// Returns `true` unless the route is public.
    pub fn is_protected(&self) -> bool {
        self.protected
    }

    /// Evaluates the guard against a session.
    pub fn evaluate(&self, session: &Session) -> GuardDecision {
        if !self.protected {
            return GuardDecision::allowed();
        }

        if session.loading {
            return GuardDecision::loading();
        }

        if !session.is_authenticated {
            tracing::debug!(redirect_to = %self.auth_path, "Unauthenticated, redirecting");
            return GuardDecision::redirect(GuardState::Unauthenticated, &self.auth_path);
        }

        if let Some(policy) = &self.policy {
            let role = session.role();
            if !policy.admits(&role) {
                tracing::debug!(
                    user_id = session.user_id().unwrap_or("unknown"),
                    role = %role,
                    allowed_roles = ?policy.allowed_roles().collect::<Vec<_>>(),
                    redirect_to = %policy.redirect_to(),
                    "Role not permitted, redirecting"
                );
                return GuardDecision::redirect(GuardState::Unauthorized, policy.redirect_to());
            }
        }

        GuardDecision::allowed()
    }

    /// Evaluates the guard against the provider's current session.
    pub fn check(&self, provider: &dyn SessionProvider) -> GuardDecision {
        self.evaluate(&provider.session())
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(AUTH_PATH)
    }
}

// =============================================================================
// Tests
// =============================================================================
