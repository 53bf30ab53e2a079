// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for gate composition and session resolution.
//!
//! Guard outcomes (placeholder, redirect) are not errors. These types only
//! cover invalid policy or catalog definitions and failures of the external
//! session provider.

use thiserror::Error;

/// Result type alias for gate composition.
pub type GateResult<T> = Result<T, GateError>;

// =============================================================================
// GateError
// =============================================================================

/// Errors raised while assembling routes, policies or catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// A path does not start with `/`.
    #[error("Invalid path '{path}': {message}")]
    InvalidPath {
        /// The offending path.
        path: String,
        /// Why it was rejected.
        message: String,
    },

    /// The same path was declared twice.
    #[error("Duplicate {kind} path: {path}")]
    DuplicatePath {
        /// What was duplicated ("navigation" or "route").
        kind: &'static str,
        /// The duplicated path.
        path: String,
    },

    /// A restricted catalog entry is missing from the default catalog.
    #[error("Restricted navigation path '{path}' is not part of the catalog")]
    UnknownRestrictedPath {
        /// The unknown path.
        path: String,
    },

    /// A route policy has no allowed roles.
    #[error("Route '{path}' declares an empty allowed-role set")]
    EmptyAllowedRoles {
        /// The route path.
        path: String,
    },

    /// Following a denied role's fallbacks revisits a path.
    #[error("Redirect loop for role '{role}': '{path}' falls back to '{redirect_to}', which is already in its fallback chain")]
    RedirectLoop {
        /// The role caught in the loop.
        role: String,
        /// The guarded route.
        path: String,
        /// Its fallback.
        redirect_to: String,
    },
}

impl GateError {
    /// Creates an invalid path error.
    pub fn invalid_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a duplicate path error.
    pub fn duplicate_path(kind: &'static str, path: impl Into<String>) -> Self {
        Self::DuplicatePath {
            kind,
            path: path.into(),
        }
    }

    /// Returns the error type as a string for logging.
    pub fn error_type(&self) -> &'static str {
        match self {
            GateError::InvalidPath { .. } => "invalid_path",
            GateError::DuplicatePath { .. } => "duplicate_path",
            GateError::UnknownRestrictedPath { .. } => "unknown_restricted_path",
            GateError::EmptyAllowedRoles { .. } => "empty_allowed_roles",
            GateError::RedirectLoop { .. } => "redirect_loop",
        }
    }
}

// =============================================================================
// SessionError
// =============================================================================

/// Failures of the external session provider.
///
/// The gate never surfaces these to users. A failed resolution is published
/// as an unauthenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The provider could not resolve the session.
    #[error("Session provider failed: {message}")]
    Provider {
        /// Error message from the provider.
        message: String,
    },

    /// The session signal was dropped.
    #[error("Session signal closed")]
    Closed,
}

impl SessionError {
    /// Creates a provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }
}

// =============================================================================
// TransitionError
// =============================================================================

/// Failures of the host's animated-transition primitive.
///
/// The navigator recovers from all of them with an immediate navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The primitive threw or rejected.
    #[error("View transition rejected: {message}")]
    Rejected {
        /// Error message from the host.
        message: String,
    },
}

impl TransitionError {
    /// Creates a rejected error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Validates that a path is absolute.
pub(crate) fn ensure_absolute(path: &str) -> GateResult<()> {
    if !path.starts_with('/') {
        return Err(GateError::invalid_path(path, "must start with '/'"));
    }
    if path.contains(char::is_whitespace) {
        return Err(GateError::invalid_path(path, "must not contain whitespace"));
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_absolute() {
        assert!(ensure_absolute("/").is_ok());
        assert!(ensure_absolute("/admin/users").is_ok());
        assert!(matches!(
            ensure_absolute("admin"),
            Err(GateError::InvalidPath { .. })
        ));
        assert!(ensure_absolute("/a b").is_err());
    }

    #[test]
    fn test_error_display() {
        let err = GateError::duplicate_path("route", "/admin");
        assert_eq!(err.to_string(), "Duplicate route path: /admin");
        assert_eq!(err.error_type(), "duplicate_path");

        let err = SessionError::provider("timeout");
        assert_eq!(err.to_string(), "Session provider failed: timeout");
    }
}
