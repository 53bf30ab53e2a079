// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Navigation handler.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sitegate_core::{NavigationItem, TransitionMode};

use crate::context::GateSession;
use crate::state::AppState;

/// Query parameters for `/api/navigation`.
#[derive(Debug, Default, Deserialize)]
pub struct NavigationQuery {
    /// Current path, used to mark the active item.
    pub current: Option<String>,
}

/// A visible menu entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationEntry {
    /// Display name.
    pub name: String,
    /// Icon identity.
    pub icon_id: String,
    /// Destination path.
    pub path: String,
    /// Whether the entry matches the current path.
    pub active: bool,
}

impl NavigationEntry {
    fn from_item(item: NavigationItem, current: Option<&str>) -> Self {
        let active = current.is_some_and(|path| item.is_active(path));
        Self {
            name: item.name,
            icon_id: item.icon_id,
            path: item.path,
            active,
        }
    }
}

/// The visible menu for the request's session.
#[derive(Debug, Serialize, Deserialize)]
pub struct NavigationResponse {
    /// Whether the session is authenticated.
    pub authenticated: bool,
    /// Whether the session is still resolving.
    pub loading: bool,
    /// Normalized role; empty when there is none.
    pub role: String,
    /// Transition mode client routers should use.
    pub transition: TransitionMode,
    /// Visible entries in catalog order.
    pub items: Vec<NavigationEntry>,
}

/// GET /api/navigation
pub async fn navigation(
    State(state): State<AppState>,
    GateSession(session): GateSession,
    Query(query): Query<NavigationQuery>,
) -> Json<NavigationResponse> {
    let current = query.current.as_deref();
    let items = state
        .visibility()
        .visible_for_session(&session)
        .into_iter()
        .map(|item| NavigationEntry::from_item(item, current))
        .collect();

    Json(NavigationResponse {
        authenticated: session.is_authenticated,
        loading: session.loading,
        role: session.role(),
        transition: state.transition,
        items,
    })
}
