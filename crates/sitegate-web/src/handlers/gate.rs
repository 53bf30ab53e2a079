// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Guard decision handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sitegate_core::{AccessPolicy, GuardDecision};

use crate::context::GateSession;
use crate::error::{ApiError, ApiResult};

/// Query parameters for `/api/gate`.
#[derive(Debug, Default, Deserialize)]
pub struct GateQuery {
    /// Path to evaluate.
    pub path: Option<String>,
}

/// A guard decision for a path.
#[derive(Debug, Serialize)]
pub struct GateResponse {
    /// The evaluated path.
    pub path: String,
    /// Whether the path needs a session at all.
    pub protected: bool,
    /// The decision.
    #[serde(flatten)]
    pub decision: GuardDecision,
}

/// GET /api/gate?path=/admin
///
/// Evaluates the same guard the middleware would apply to `path`.
pub async fn gate(
    State(policy): State<Arc<AccessPolicy>>,
    GateSession(session): GateSession,
    Query(query): Query<GateQuery>,
) -> ApiResult<Json<GateResponse>> {
    let path = query
        .path
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter 'path' is required"))?;

    if !path.starts_with('/') {
        return Err(ApiError::bad_request("Query parameter 'path' must start with '/'"));
    }

    let guard = policy.guard_for(&path);
    let decision = guard.evaluate(&session);

    Ok(Json(GateResponse {
        protected: guard.is_protected(),
        path,
        decision,
    }))
}
