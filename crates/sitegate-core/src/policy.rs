// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role policy table.
//!
//! [`AccessPolicy`] is the single table of route rules. Both the route guard
//! ([`AccessPolicy::guard_for`]) and the navigation filter
//! ([`AccessPolicy::admits`]) read from it, so a link is never shown for a
//! destination the guard would reject.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::error::{ensure_absolute, GateError, GateResult};
use crate::guard::RouteGuard;
use crate::path::{is_within, normalize_path};
use crate::role::{normalize_role, Role};

/// Entry path for unauthenticated sessions.
pub const AUTH_PATH: &str = "/auth";

/// Fallback for authenticated sessions that lack the required role.
pub const DEFAULT_REDIRECT: &str = "/";

/// Admin-only area of the dashboard.
pub const ADMIN_PATH: &str = "/admin";

/// Liveness endpoint, always public.
pub const HEALTH_PATH: &str = "/health";

// =============================================================================
// RouteGuardPolicy
// =============================================================================

/// Role requirement attached to a protected route.
///
/// Role names are normalized on construction and on every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteGuardPolicy {
    allowed_roles: BTreeSet<String>,
    redirect_to: String,
}

impl RouteGuardPolicy {
    /// Creates a policy admitting the given roles, redirecting to `/` otherwise.
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_roles = roles
            .into_iter()
            .map(|r| normalize_role(r.as_ref()))
            .filter(|r| !r.is_empty())
            .collect();

        Self {
            allowed_roles,
            redirect_to: DEFAULT_REDIRECT.to_string(),
        }
    }

    /// Sets the fallback path for denied roles.
    pub fn with_redirect(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }

    /// Returns `true` if the role is in the allowed set.
    ///
    /// An empty role is never admitted.
    pub fn admits(&self, role: &str) -> bool {
        let role = normalize_role(role);
        !role.is_empty() && self.allowed_roles.contains(&role)
    }

    /// Returns the normalized allowed roles.
    pub fn allowed_roles(&self) -> impl Iterator<Item = &str> {
        self.allowed_roles.iter().map(String::as_str)
    }

    /// Returns the fallback path.
    pub fn redirect_to(&self) -> &str {
        &self.redirect_to
    }
}

// =============================================================================
// RouteRule
// =============================================================================

/// A guarded route tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRule {
    /// Root of the guarded tree.
    pub path: String,
    /// Role requirement for the tree.
    pub policy: RouteGuardPolicy,
}

// =============================================================================
// AccessPolicy
// =============================================================================

/// The shared role-policy table.
#[derive(Debug, Clone, Serialize)]
pub struct AccessPolicy {
    auth_path: String,
    public_paths: Vec<String>,
    /// Sorted by path length, longest first.
    rules: Vec<RouteRule>,
}

impl AccessPolicy {
    /// Creates a policy builder.
    pub fn builder() -> AccessPolicyBuilder {
        AccessPolicyBuilder::new()
    }

    /// The built-in policy of the construction dashboard.
    ///
    /// `/admin` is reserved for admins and engineers; `/auth` and `/health`
    /// are public; every other route only requires authentication.
    pub fn construction_dashboard() -> Self {
        Self {
            auth_path: AUTH_PATH.to_string(),
            public_paths: vec![AUTH_PATH.to_string(), HEALTH_PATH.to_string()],
            rules: vec![RouteRule {
                path: ADMIN_PATH.to_string(),
                policy: RouteGuardPolicy::new([Role::Admin.as_str(), Role::Engineer.as_str()]),
            }],
        }
    }

    /// Returns the unauthenticated entry path.
    pub fn auth_path(&self) -> &str {
        &self.auth_path
    }

    /// Returns the public paths.
    pub fn public_paths(&self) -> &[String] {
        &self.public_paths
    }

    /// Returns the route rules, most specific first.
    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Returns `true` if the path needs no session at all.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| is_within(p, path))
    }

    /// Returns the most specific rule covering the path.
    pub fn rule_for(&self, path: &str) -> Option<&RouteRule> {
        let path = normalize_path(path);
        self.rules.iter().find(|rule| is_within(&rule.path, path))
    }

    /// Builds the guard for a requested path.
    pub fn guard_for(&self, path: &str) -> RouteGuard {
        if self.is_public(path) {
            return RouteGuard::public();
        }

        let guard = RouteGuard::new(&self.auth_path);
        match self.rule_for(path) {
            Some(rule) => guard.with_policy(rule.policy.clone()),
            None => guard,
        }
    }

    /// Returns `true` if an authenticated session with `role` may reach `path`.
    ///
    /// This is the same rule the guard applies once loading has finished.
    pub fn admits(&self, role: &str, path: &str) -> bool {
        if self.is_public(path) {
            return true;
        }
        self.rule_for(path)
            .map(|rule| rule.policy.admits(role))
            .unwrap_or(true)
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::construction_dashboard()
    }
}

// =============================================================================
// AccessPolicyBuilder
// =============================================================================

/// Builder for the role-policy table.
#[derive(Debug, Default)]
pub struct AccessPolicyBuilder {
    auth_path: Option<String>,
    public_paths: Vec<String>,
    rules: Vec<RouteRule>,
}

impl AccessPolicyBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the unauthenticated entry path (default `/auth`).
    pub fn auth_path(mut self, path: impl Into<String>) -> Self {
        self.auth_path = Some(path.into());
        self
    }

    /// Adds a public path.
    pub fn public(mut self, path: impl Into<String>) -> Self {
        self.public_paths.push(path.into());
        self
    }

    /// Guards a route tree with a role policy.
    pub fn route(mut self, path: impl Into<String>, policy: RouteGuardPolicy) -> Self {
        self.rules.push(RouteRule {
            path: path.into(),
            policy,
        });
        self
    }

    /// Validates and builds the table.
    ///
    /// The auth path is always public. Following a denied role's fallbacks
    /// from any rule must end on a page the role can render; a chain that
    /// revisits a path is a redirect loop.
    pub fn build(self) -> GateResult<AccessPolicy> {
        let auth_path = self.auth_path.unwrap_or_else(|| AUTH_PATH.to_string());
        ensure_absolute(&auth_path)?;

        let mut public_paths = Vec::with_capacity(self.public_paths.len() + 1);
        public_paths.push(auth_path.clone());
        for path in self.public_paths {
            ensure_absolute(&path)?;
            if !public_paths.contains(&path) {
                public_paths.push(path);
            }
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            ensure_absolute(&rule.path)?;
            ensure_absolute(rule.policy.redirect_to())?;
            if !seen.insert(normalize_path(&rule.path).to_string()) {
                return Err(GateError::duplicate_path("route", &rule.path));
            }
            if rule.policy.allowed_roles.is_empty() {
                return Err(GateError::EmptyAllowedRoles {
                    path: rule.path.clone(),
                });
            }
        }

        let mut rules = self.rules;
        rules.sort_by(|a, b| {
            normalize_path(&b.path)
                .len()
                .cmp(&normalize_path(&a.path).len())
        });

        let policy = AccessPolicy {
            auth_path,
            public_paths,
            rules,
        };
        policy.check_redirects()?;
        Ok(policy)
    }
}

impl AccessPolicy {
    fn check_redirects(&self) -> GateResult<()> {
        let mut roles: Vec<&str> = Role::RECOGNIZED.iter().map(Role::as_str).collect();
        for role in self.rules.iter().flat_map(|rule| rule.policy.allowed_roles()) {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        // No rule admits the empty role, so it stands in for every other one.
        roles.push("");

        for role in roles {
            for rule in &self.rules {
                self.follow_redirects(role, &rule.path)?;
            }
        }
        Ok(())
    }

    fn follow_redirects(&self, role: &str, start: &str) -> GateResult<()> {
        let mut visited = HashSet::new();
        visited.insert(normalize_path(start).to_string());

        let mut current = start;
        while let Some(rule) = self.denying_rule(role, current) {
            let target = rule.policy.redirect_to();
            if !visited.insert(normalize_path(target).to_string()) {
                let role = if role.is_empty() {
                    Role::Unrecognized.as_str()
                } else {
                    role
                };
                return Err(GateError::RedirectLoop {
                    role: role.to_string(),
                    path: rule.path.clone(),
                    redirect_to: target.to_string(),
                });
            }
            current = target;
        }
        Ok(())
    }

    fn denying_rule(&self, role: &str, path: &str) -> Option<&RouteRule> {
        if self.is_public(path) {
            return None;
        }
        self.rule_for(path).filter(|rule| !rule.policy.admits(role))
    }
}

// =============================================================================
// Tests
// =============================================================================
