// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role-based navigation visibility.

use std::sync::Arc;

use crate::catalog::{NavigationCatalog, NavigationItem};
use crate::policy::AccessPolicy;
use crate::session::SessionProvider;

/// Returns the items a role may see, in catalog order.
///
/// The restricted role gets the restricted tier; everyone else gets the
/// default tier. Items whose destination the policy would reject for the
/// role are dropped, so an empty or unrecognized role never sees the admin
/// entry.
pub fn visible_items(
    role: &str,
    catalog: &NavigationCatalog,
    policy: &AccessPolicy,
) -> Vec<NavigationItem> {
    catalog
        .tier_for(role)
        .iter()
        .filter(|item| policy.admits(role, &item.path))
        .cloned()
        .collect()
}

/// Computes the visible navigation for sessions.
#[derive(Debug, Clone)]
pub struct VisibilityFilter {
    catalog: Arc<NavigationCatalog>,
    policy: Arc<AccessPolicy>,
}

impl VisibilityFilter {
    /// Creates a filter over a catalog and the shared policy table.
    pub fn new(catalog: Arc<NavigationCatalog>, policy: Arc<AccessPolicy>) -> Self {
        Self { catalog, policy }
    }

    /// Returns the visible items for a role.
    pub fn visible_for(&self, role: &str) -> Vec<NavigationItem> {
        visible_items(role, &self.catalog, &self.policy)
    }

    /// Returns the visible items for the provider's current session.
    ///
    /// A loading or anonymous session has no role and gets the default tier
    /// minus guarded destinations.
    pub fn visible_for_session(&self, provider: &dyn SessionProvider) -> Vec<NavigationItem> {
        self.visible_for(&provider.session().role())
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &NavigationCatalog {
        &self.catalog
    }

    /// Returns the policy table.
    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }
}

impl Default for VisibilityFilter {
    fn default() -> Self {
        Self::new(
            Arc::new(NavigationCatalog::construction_dashboard()),
            Arc::new(AccessPolicy::construction_dashboard()),
        )
    }
}
