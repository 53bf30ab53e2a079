// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Route guard middleware.
//!
//! Enforces [`RouteGuard`](sitegate_core::RouteGuard) decisions at the
//! routing boundary:
//!
//! | Outcome     | Response                                              |
//! |-------------|-------------------------------------------------------|
//! | Placeholder | `200` skeleton, `Cache-Control: no-store`, `Refresh`  |
//! | Redirect    | `303 See Other` with `Location`                       |
//! | Render      | inner service, session in request extensions          |

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    response::{Html, IntoResponse, Response},
};
use sitegate_core::{AccessPolicy, GuardDecision, GuardOutcome, GuardState, Session};
use tower::{Layer, Service};

use crate::config::WebConfig;
use crate::context::GateContext;
use crate::session_source::SessionSource;

/// Response header carrying the guard state.
pub const GATE_STATE_HEADER: &str = "x-gate-state";

/// Header value for exempt paths.
const EXEMPT_STATE: &str = "exempt";

const REFRESH_HEADER: &str = "refresh";

// =============================================================================
// GuardLayer
// =============================================================================

/// Layer enforcing route guard decisions.
#[derive(Clone)]
pub struct GuardLayer {
    policy: Arc<AccessPolicy>,
    source: Arc<dyn SessionSource>,
    placeholder: Arc<str>,
    refresh_secs: u64,
    exempt_prefixes: Arc<Vec<String>>,
}

impl GuardLayer {
    /// Creates a guard layer with the default placeholder and no exemptions.
    pub fn new(policy: Arc<AccessPolicy>, source: Arc<dyn SessionSource>) -> Self {
        let defaults = WebConfig::default();
        Self {
            policy,
            source,
            placeholder: Arc::from(defaults.placeholder_html),
            refresh_secs: defaults.placeholder_refresh_secs,
            exempt_prefixes: Arc::new(Vec::new()),
        }
    }

    /// Applies placeholder and exemption settings from the web config.
    pub fn with_config(mut self, config: &WebConfig) -> Self {
        self.placeholder = Arc::from(config.placeholder_html.as_str());
        self.refresh_secs = config.placeholder_refresh_secs;
        self.exempt_prefixes = Arc::new(config.exempt_prefixes.clone());
        self
    }

    /// Exempts path prefixes from enforcement.
    ///
    /// Exempt requests still carry the resolved session.
    pub fn with_exempt_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.exempt_prefixes = Arc::new(prefixes);
        self
    }
}

impl<S> Layer<S> for GuardLayer {
    type Service = GuardMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GuardMiddleware {
            inner,
            policy: self.policy.clone(),
            source: self.source.clone(),
            placeholder: self.placeholder.clone(),
            refresh_secs: self.refresh_secs,
            exempt_prefixes: self.exempt_prefixes.clone(),
        }
    }
}

// =============================================================================
// GuardMiddleware
// =============================================================================

/// Middleware enforcing route guard decisions.
#[derive(Clone)]
pub struct GuardMiddleware<S> {
    inner: S,
    policy: Arc<AccessPolicy>,
    source: Arc<dyn SessionSource>,
    placeholder: Arc<str>,
    refresh_secs: u64,
    exempt_prefixes: Arc<Vec<String>>,
}

impl<S> GuardMiddleware<S> {
    fn is_exempt(&self, path: &str) -> bool {
        self.exempt_prefixes.iter().any(|prefix| {
            path == prefix
                || path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

impl<S> Service<Request<Body>> for GuardMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let path = req.uri().path().to_string();
        let guard = self.policy.guard_for(&path);
        let exempt = self.is_exempt(&path);
        let source = self.source.clone();
        let placeholder = self.placeholder.clone();
        let refresh_secs = self.refresh_secs;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let (mut parts, body) = req.into_parts();

            let session = match source.session(&parts).await {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!(error = %e, path = %path, "Session source failed, treating as unauthenticated");
                    Session::anonymous()
                }
            };

            let decision = guard.evaluate(&session);
            let context = GateContext::new(session.clone(), decision.state);

            tracing::trace!(
                request_id = %context.request_id,
                path = %path,
                state = %decision.state,
                exempt,
                "Guard evaluated"
            );

            if exempt {
                parts.extensions.insert(session);
                parts.extensions.insert(context);
                let response = inner.call(Request::from_parts(parts, body)).await?;
                return Ok(with_state_header(response, EXEMPT_STATE));
            }

            match &decision.outcome {
                GuardOutcome::Render => {
                    parts.extensions.insert(session);
                    parts.extensions.insert(context);
                    let response = inner.call(Request::from_parts(parts, body)).await?;
                    Ok(with_state_header(response, decision.state.as_str()))
                }
                GuardOutcome::Placeholder => Ok(placeholder_response(&placeholder, refresh_secs)),
                GuardOutcome::Redirect(request) => {
                    tracing::debug!(
                        request_id = %context.request_id,
                        user_id = context.session.user_id().unwrap_or("anonymous"),
                        from = %path,
                        to = %request.target_path,
                        state = %decision.state,
                        "Redirecting"
                    );
                    Ok(redirect_response(&decision, &request.target_path))
                }
            }
        })
    }
}

// =============================================================================
// Responses
// =============================================================================

fn with_state_header(mut response: Response, state: &'static str) -> Response {
    response
        .headers_mut()
        .insert(GATE_STATE_HEADER, HeaderValue::from_static(state));
    response
}

fn placeholder_response(html: &str, refresh_secs: u64) -> Response {
    let mut response = (StatusCode::OK, Html(html.to_string())).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(REFRESH_HEADER, HeaderValue::from(refresh_secs));
    with_state_header(response, GuardState::Loading.as_str())
}

fn redirect_response(decision: &GuardDecision, target: &str) -> Response {
    let mut response = StatusCode::SEE_OTHER.into_response();
    match HeaderValue::from_str(target) {
        Ok(location) => {
            response.headers_mut().insert(header::LOCATION, location);
        }
        Err(_) => {
            tracing::error!(target_path = %target, "Redirect target is not a valid header value");
            response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    with_state_header(response, decision.state.as_str())
}

// =============================================================================
// Tests
// =============================================================================
