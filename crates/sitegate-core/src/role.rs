// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role vocabulary and normalization.
//!
//! Roles arrive from the authentication provider as free text. Every
//! comparison in the gate goes through [`normalize_role`] or [`Role::parse`],
//! so "Admin", " admin " and "ADMIN" are the same role everywhere.

use serde::{Deserialize, Serialize};

// =============================================================================
// Normalization
// =============================================================================

/// Normalizes a free-text role for comparison.
///
/// Trims surrounding whitespace and lower-cases the value. An empty result
/// means "no role".
pub fn normalize_role(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// =============================================================================
// Role
// =============================================================================

/// The closed role vocabulary of the dashboard.
///
/// Anything outside the vocabulary, including an empty or missing role,
/// maps to [`Role::Unrecognized`] and is treated as least-privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including the admin area.
    Admin,
    /// Site engineers; share the admin area with admins.
    Engineer,
    /// Field workers; see the restricted navigation catalog.
    Worker,
    /// Any other value, or no role at all.
    Unrecognized,
}

impl Role {
    /// Every recognized role, in privilege order.
    pub const RECOGNIZED: [Role; 3] = [Role::Admin, Role::Engineer, Role::Worker];

    /// Returns the canonical role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Engineer => "engineer",
            Role::Worker => "worker",
            Role::Unrecognized => "unrecognized",
        }
    }

    /// Parses a recognized role, case-insensitively.
    ///
    /// Returns `None` for anything outside the vocabulary.
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_role(s).as_str() {
            "admin" => Some(Role::Admin),
            "engineer" => Some(Role::Engineer),
            "worker" => Some(Role::Worker),
            _ => None,
        }
    }

    /// Classifies an optional free-text role.
    pub fn classify(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or(Role::Unrecognized)
    }

    /// Returns `true` for roles inside the vocabulary.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Unrecognized)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Tests
// =============================================================================
