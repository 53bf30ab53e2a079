// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Request context attached by the guard middleware.

use axum::{extract::FromRequestParts, http::request::Parts};
use sitegate_core::{GuardState, Session};
use uuid::Uuid;

/// What the guard knew about a request when it let it through.
#[derive(Debug, Clone)]
pub struct GateContext {
    /// Request ID.
    pub request_id: Uuid,
    /// The resolved session.
    pub session: Session,
    /// The guard state for the requested path.
    pub state: GuardState,
}

impl GateContext {
    /// Creates a context with a fresh request ID.
    pub fn new(session: Session, state: GuardState) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            session,
            state,
        }
    }
}

/// Extractor for the request's session.
///
/// Falls back to an anonymous session when no guard ran, so handlers never
/// see more privilege than the middleware granted.
pub struct GateSession(pub Session);

impl<S> FromRequestParts<S> for GateSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .unwrap_or_else(Session::anonymous);
        Ok(GateSession(session))
    }
}
