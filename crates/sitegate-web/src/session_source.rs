// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Per-request session sources.
//!
//! The gate does not authenticate anyone. A [`SessionSource`] reports what
//! the external authentication provider already decided, either from
//! headers set by an upstream proxy or from a process-wide
//! [`SessionSignal`].

use async_trait::async_trait;
use axum::http::{request::Parts, HeaderMap};
use sitegate_core::{Session, SessionError, SessionSignal, User};

/// Header carrying the authenticated user id.
pub const USER_HEADER: &str = "x-auth-user";

/// Header carrying the user's role.
pub const ROLE_HEADER: &str = "x-auth-role";

/// Header carrying the user's display name.
pub const NAME_HEADER: &str = "x-auth-name";

/// Header carrying the user's email.
pub const EMAIL_HEADER: &str = "x-auth-email";

// =============================================================================
// SessionSource
// =============================================================================

/// Resolves the session for a request.
///
/// Errors never reach the user; the guard treats them as unauthenticated.
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Resolves the session for the request described by `parts`.
    async fn session(&self, parts: &Parts) -> Result<Session, SessionError>;
}

// =============================================================================
// HeaderSessionSource
// =============================================================================

/// Trusts identity headers set by an upstream authentication proxy.
///
/// A request without the user header is unauthenticated. The proxy must
/// strip these headers from client traffic.
#[derive(Debug, Clone)]
pub struct HeaderSessionSource {
    user_header: String,
    role_header: String,
}

impl HeaderSessionSource {
    /// Creates a source reading the default `x-auth-*` headers.
    pub fn new() -> Self {
        Self {
            user_header: USER_HEADER.to_string(),
            role_header: ROLE_HEADER.to_string(),
        }
    }

    /// Overrides the header names.
    pub fn with_headers(user_header: impl Into<String>, role_header: impl Into<String>) -> Self {
        Self {
            user_header: user_header.into(),
            role_header: role_header.into(),
        }
    }

    /// Reads the session from a header map.
    pub fn from_headers(&self, headers: &HeaderMap) -> Result<Session, SessionError> {
        let Some(user_id) = header_str(headers, &self.user_header)? else {
            return Ok(Session::anonymous());
        };
        if user_id.is_empty() {
            return Ok(Session::anonymous());
        }

        let role = header_str(headers, &self.role_header)?.unwrap_or_default();
        let mut user = User::new(role).with_id(user_id);
        if let Some(name) = header_str(headers, NAME_HEADER)? {
            user = user.with_name(name);
        }
        if let Some(email) = header_str(headers, EMAIL_HEADER)? {
            user = user.with_email(email);
        }

        Ok(Session::authenticated(user))
    }
}

impl Default for HeaderSessionSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionSource for HeaderSessionSource {
    async fn session(&self, parts: &Parts) -> Result<Session, SessionError> {
        self.from_headers(&parts.headers)
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Result<Option<String>, SessionError> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|v| Some(v.trim().to_string()))
            .map_err(|_| SessionError::provider(format!("header '{}' is not valid text", name))),
    }
}

// =============================================================================
// SignalSessionSource
// =============================================================================

/// Reads a process-wide session signal.
///
/// Used when the server fronts a single session, e.g. a kiosk or a desktop
/// shell, where the provider publishes into a [`SessionSignal`].
#[derive(Debug, Clone)]
pub struct SignalSessionSource {
    signal: SessionSignal,
}

impl SignalSessionSource {
    /// Creates a source over a signal.
    pub fn new(signal: SessionSignal) -> Self {
        Self { signal }
    }

    /// Returns the signal.
    pub fn signal(&self) -> &SessionSignal {
        &self.signal
    }
}

#[async_trait]
impl SessionSource for SignalSessionSource {
    async fn session(&self, _parts: &Parts) -> Result<Session, SessionError> {
        Ok(self.signal.snapshot())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, Request};

    use super::*;

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_missing_user_is_anonymous() {
        let session = HeaderSessionSource::new().session(&parts(&[])).await.unwrap();
        assert!(!session.is_authenticated);
        assert!(!session.loading);
    }

    #[tokio::test]
    async fn test_headers_build_user() {
        let session = HeaderSessionSource::new()
            .session(&parts(&[
                ("x-auth-user", "u-17"),
                ("x-auth-role", "Engineer"),
                ("x-auth-name", "Dana"),
            ]))
            .await
            .unwrap();

        assert!(session.is_authenticated);
        assert_eq!(session.role(), "engineer");
        assert_eq!(session.user_id(), Some("u-17"));
    }

    #[tokio::test]
    async fn test_user_without_role_has_empty_role() {
        let session = HeaderSessionSource::new()
            .session(&parts(&[("x-auth-user", "u-1")]))
            .await
            .unwrap();
        assert!(session.is_authenticated);
        assert_eq!(session.role(), "");
    }

    #[tokio::test]
    async fn test_custom_header_names() {
        let source = HeaderSessionSource::with_headers("x-forwarded-user", "x-forwarded-groups");
        let session = source
            .session(&parts(&[
                ("x-forwarded-user", "u-9"),
                ("x-forwarded-groups", "admin"),
                ("x-auth-user", "ignored"),
            ]))
            .await
            .unwrap();
        assert_eq!(session.user_id(), Some("u-9"));
        assert_eq!(session.role(), "admin");

        let session = source.session(&parts(&[("x-auth-user", "u-1")])).await.unwrap();
        assert!(!session.is_authenticated);
    }

    #[test]
    fn test_invalid_header_is_error() {
        let mut headers = HeaderMap::new();
        headers.insert("x-auth-user", HeaderValue::from_bytes(b"\xff\xfe").unwrap());
        assert!(HeaderSessionSource::new().from_headers(&headers).is_err());
    }

    #[tokio::test]
    async fn test_signal_source_follows_signal() {
        let signal = SessionSignal::new();
        let source = SignalSessionSource::new(signal.clone());
        assert!(source.session(&parts(&[])).await.unwrap().loading);

        signal.resolve(Ok(Session::authenticated(User::new("worker"))));
        assert_eq!(source.session(&parts(&[])).await.unwrap().role(), "worker");
    }
}
