// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Navigation catalog.
//!
//! The catalog is a static, ordered list of destinations plus a restricted
//! subset for the restricted role. It carries no access rules of its own.
//! Which items a role actually sees is decided by
//! [`VisibilityFilter`](crate::visibility::VisibilityFilter) against the
//! shared [`AccessPolicy`](crate::policy::AccessPolicy).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_absolute, GateError, GateResult};
use crate::path::{is_within, normalize_path};
use crate::role::{normalize_role, Role};

/// Built-in destinations of the construction dashboard: (name, icon, path).
const DASHBOARD_ITEMS: [(&str, &str, &str); 7] = [
    ("Dashboard", "layout-dashboard", "/"),
    ("Projects", "folder-kanban", "/projects"),
    ("Tasks", "list-checks", "/tasks"),
    ("Materials", "package", "/materials"),
    ("Reports", "file-bar-chart", "/reports"),
    ("AI", "bot", "/ai"),
    ("Admin", "shield", "/admin"),
];

/// Destinations shown to the restricted role.
const RESTRICTED_PATHS: [&str; 2] = ["/reports", "/ai"];

// =============================================================================
// NavigationItem
// =============================================================================

/// A navigation destination. Identity is the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NavigationItem {
    /// Display name.
    pub name: String,
    /// Icon identity understood by the menu renderer.
    pub icon_id: String,
    /// Destination path.
    pub path: String,
}

impl NavigationItem {
    /// Creates a navigation item.
    pub fn new(
        name: impl Into<String>,
        icon_id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            icon_id: icon_id.into(),
            path: path.into(),
        }
    }

    /// Returns `true` if the item should be highlighted for `current_path`.
    pub fn is_active(&self, current_path: &str) -> bool {
        is_within(&self.path, current_path)
    }
}

// =============================================================================
// NavigationCatalog
// =============================================================================

/// Ordered default catalog plus the restricted subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationCatalog {
    items: Vec<NavigationItem>,
    restricted: Vec<NavigationItem>,
    restricted_role: String,
}

impl NavigationCatalog {
    /// Creates a catalog builder.
    pub fn builder() -> NavigationCatalogBuilder {
        NavigationCatalogBuilder::new()
    }

    /// The built-in construction dashboard catalog.
    pub fn construction_dashboard() -> Self {
        let items: Vec<NavigationItem> = DASHBOARD_ITEMS
            .iter()
            .map(|(name, icon, path)| NavigationItem::new(*name, *icon, *path))
            .collect();
        let restricted = items
            .iter()
            .filter(|item| RESTRICTED_PATHS.contains(&item.path.as_str()))
            .cloned()
            .collect();

        Self {
            items,
            restricted,
            restricted_role: Role::Worker.as_str().to_string(),
        }
    }

    /// The default catalog, in definition order.
    pub fn items(&self) -> &[NavigationItem] {
        &self.items
    }

    /// The restricted catalog, in definition order.
    pub fn restricted(&self) -> &[NavigationItem] {
        &self.restricted
    }

    /// The normalized role that receives the restricted catalog.
    pub fn restricted_role(&self) -> &str {
        &self.restricted_role
    }

    /// Selects the catalog tier for a role.
    ///
    /// Only an exact (case-insensitive) match of the restricted role gets the
    /// restricted tier. Empty and unknown roles get the default tier.
    pub fn tier_for(&self, role: &str) -> &[NavigationItem] {
        let role = normalize_role(role);
        if !role.is_empty() && role == self.restricted_role {
            &self.restricted
        } else {
            &self.items
        }
    }

    /// Looks up an item by path.
    pub fn get(&self, path: &str) -> Option<&NavigationItem> {
        let path = normalize_path(path);
        self.items
            .iter()
            .find(|item| normalize_path(&item.path) == path)
    }

    /// Returns the number of items in the default catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for NavigationCatalog {
    fn default() -> Self {
        Self::construction_dashboard()
    }
}

// =============================================================================
// NavigationCatalogBuilder
// =============================================================================

/// Builder for navigation catalogs.
#[derive(Debug, Default)]
pub struct NavigationCatalogBuilder {
    items: Vec<NavigationItem>,
    restricted_paths: Vec<String>,
    restricted_role: Option<String>,
}

impl NavigationCatalogBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item to the default catalog.
    pub fn item(
        mut self,
        name: impl Into<String>,
        icon_id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        self.items.push(NavigationItem::new(name, icon_id, path));
        self
    }

    /// Appends prepared items to the default catalog.
    pub fn items(mut self, items: impl IntoIterator<Item = NavigationItem>) -> Self {
        self.items.extend(items);
        self
    }

    /// Marks a catalog path as part of the restricted tier.
    pub fn restrict(mut self, path: impl Into<String>) -> Self {
        self.restricted_paths.push(path.into());
        self
    }

    /// Sets the role that receives the restricted tier (default: worker).
    pub fn restricted_role(mut self, role: impl AsRef<str>) -> Self {
        self.restricted_role = Some(normalize_role(role.as_ref()));
        self
    }

    /// Validates and builds the catalog.
    ///
    /// Paths are compared the way the guard compares them, so `/reports`
    /// and `/reports/` name the same item. The restricted tier keeps the
    /// order of the default catalog, whatever order the paths were restricted
    /// in.
    pub fn build(self) -> GateResult<NavigationCatalog> {
        let mut seen = HashSet::new();
        for item in &self.items {
            ensure_absolute(&item.path)?;
            if !seen.insert(normalize_path(&item.path)) {
                return Err(GateError::duplicate_path("navigation", &item.path));
            }
        }

        let restricted_paths: HashSet<&str> = self
            .restricted_paths
            .iter()
            .map(|path| normalize_path(path))
            .collect();
        for path in &self.restricted_paths {
            if !seen.contains(normalize_path(path)) {
                return Err(GateError::UnknownRestrictedPath { path: path.clone() });
            }
        }

        let restricted = self
            .items
            .iter()
            .filter(|item| restricted_paths.contains(normalize_path(&item.path)))
            .cloned()
            .collect();

        Ok(NavigationCatalog {
            items: self.items,
            restricted,
            restricted_role: self
                .restricted_role
                .unwrap_or_else(|| Role::Worker.as_str().to_string()),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[NavigationItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_construction_dashboard_catalog() {
        let catalog = NavigationCatalog::construction_dashboard();
        assert_eq!(catalog.len(), 7);
        assert_eq!(names(catalog.restricted()), vec!["Reports", "AI"]);
        assert_eq!(catalog.restricted_role(), "worker");
        assert_eq!(catalog.get("/admin").map(|i| i.name.as_str()), Some("Admin"));
    }

    #[test]
    fn test_tier_selection() {
        let catalog = NavigationCatalog::construction_dashboard();
        assert_eq!(catalog.tier_for("WORKER").len(), 2);
        assert_eq!(catalog.tier_for("admin").len(), 7);
        assert_eq!(catalog.tier_for("").len(), 7);
        assert_eq!(catalog.tier_for("editor").len(), 7);
    }

    #[test]
    fn test_builder_restricted_keeps_catalog_order() {
        let catalog = NavigationCatalog::builder()
            .item("Home", "home", "/")
            .item("Reports", "chart", "/reports")
            .item("AI", "bot", "/ai")
            .restrict("/ai")
            .restrict("/reports")
            .build()
            .unwrap();

        assert_eq!(names(catalog.restricted()), vec!["Reports", "AI"]);
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let result = NavigationCatalog::builder()
            .item("Home", "home", "/")
            .item("Start", "home", "/")
            .build();
        assert!(matches!(result, Err(GateError::DuplicatePath { .. })));
    }

    #[test]
    fn test_builder_compares_normalized_paths() {
        let result = NavigationCatalog::builder()
            .item("Reports", "chart", "/reports")
            .item("Reports (all)", "chart", "/reports/")
            .build();
        assert!(matches!(result, Err(GateError::DuplicatePath { .. })));

        let catalog = NavigationCatalog::builder()
            .item("Home", "home", "/")
            .item("Reports", "chart", "/reports/")
            .restrict("/reports")
            .build()
            .unwrap();
        assert_eq!(names(catalog.restricted()), vec!["Reports"]);
        assert_eq!(catalog.get("/reports?tab=daily").map(|i| i.name.as_str()), Some("Reports"));
    }

    #[test]
    fn test_builder_rejects_unknown_restricted_path() {
        let result = NavigationCatalog::builder()
            .item("Home", "home", "/")
            .restrict("/reports")
            .build();
        assert!(matches!(result, Err(GateError::UnknownRestrictedPath { .. })));
    }

    #[test]
    fn test_builder_rejects_relative_path() {
        let result = NavigationCatalog::builder().item("Home", "home", "home").build();
        assert!(matches!(result, Err(GateError::InvalidPath { .. })));
    }

    #[test]
    fn test_item_is_active() {
        let item = NavigationItem::new("Projects", "folder", "/projects");
        assert!(item.is_active("/projects/42"));
        assert!(!item.is_active("/projectsx"));
    }
}
