// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Implementations
//!
//! Configurable stand-ins for the gate's external collaborators, recording
//! their interactions for verification.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::http::request::Parts;
use parking_lot::Mutex;
use sitegate_core::{
    HistoryRouter, MemoryHistory, PendingUpdate, Session, SessionError, SessionResolver,
    TransitionError, TransitionHost, TransitionRequest,
};
use sitegate_web::SessionSource;

// =============================================================================
// Mock Transition Host
// =============================================================================

/// How the mock host treats a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostBehavior {
    /// Runs the update inside the call.
    RunNow,
    /// Keeps the update until [`MockTransitionHost::flush`].
    Defer,
    /// Fails to start the transition.
    Reject,
    /// Accepts the transition and drops the update.
    Forget,
}

/// A scriptable animated-transition primitive.
#[derive(Debug)]
pub struct MockTransitionHost {
    behavior: Mutex<HostBehavior>,
    deferred: Mutex<Vec<PendingUpdate>>,
    calls: AtomicUsize,
}

impl MockTransitionHost {
    /// Create a host with the given behavior.
    pub fn new(behavior: HostBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            deferred: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Change the behavior for subsequent calls.
    pub fn set_behavior(&self, behavior: HostBehavior) {
        *self.behavior.lock() = behavior;
    }

    /// Number of transitions requested.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of deferred updates not yet flushed.
    pub fn pending(&self) -> usize {
        self.deferred.lock().len()
    }

    /// Runs deferred updates, returning how many ran now.
    pub fn flush(&self) -> usize {
        let updates: Vec<PendingUpdate> = self.deferred.lock().drain(..).collect();
        updates.iter().filter(|update| update.run()).count()
    }
}

impl TransitionHost for MockTransitionHost {
    fn start_view_transition(&self, update: PendingUpdate) -> Result<(), TransitionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = *self.behavior.lock();
        match behavior {
            HostBehavior::RunNow => {
                update.run();
                Ok(())
            }
            HostBehavior::Defer => {
                self.deferred.lock().push(update);
                Ok(())
            }
            HostBehavior::Reject => Err(TransitionError::rejected("transition aborted by host")),
            HostBehavior::Forget => {
                drop(update);
                Ok(())
            }
        }
    }
}

// =============================================================================
// Recording Router
// =============================================================================

/// A history router that records every request it applies.
#[derive(Debug)]
pub struct RecordingRouter {
    history: MemoryHistory,
    requests: Mutex<Vec<TransitionRequest>>,
}

impl RecordingRouter {
    /// Create a router at `initial`.
    pub fn new(initial: &str) -> Self {
        Self {
            history: MemoryHistory::new(initial),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests applied so far, in order.
    pub fn requests(&self) -> Vec<TransitionRequest> {
        self.requests.lock().clone()
    }

    /// The history stack.
    pub fn entries(&self) -> Vec<String> {
        self.history.entries()
    }
}

impl HistoryRouter for RecordingRouter {
    fn navigate(&self, request: &TransitionRequest) {
        self.requests.lock().push(request.clone());
        self.history.navigate(request);
    }

    fn current_path(&self) -> String {
        self.history.current_path()
    }
}

// =============================================================================
// Mock Session Source
// =============================================================================

/// A session source with a scripted answer.
#[derive(Debug)]
pub struct MockSessionSource {
    answer: Mutex<Result<Session, SessionError>>,
    calls: AtomicUsize,
}

impl MockSessionSource {
    /// Answer every request with `session`.
    pub fn new(session: Session) -> Self {
        Self {
            answer: Mutex::new(Ok(session)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every request.
    pub fn failing(message: &str) -> Self {
        Self {
            answer: Mutex::new(Err(SessionError::provider(message))),
            calls: AtomicUsize::new(0),
        }
    }

    /// Change the answer.
    pub fn set(&self, answer: Result<Session, SessionError>) {
        *self.answer.lock() = answer;
    }

    /// Number of requests served.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionSource for MockSessionSource {
    async fn session(&self, _parts: &Parts) -> Result<Session, SessionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.lock().clone()
    }
}

// =============================================================================
// Mock Session Resolver
// =============================================================================

/// An external provider that answers once released.
#[derive(Debug)]
pub struct MockSessionResolver {
    answer: Result<Session, SessionError>,
    release: tokio::sync::Notify,
    gated: bool,
}

impl MockSessionResolver {
    /// Resolve immediately.
    pub fn ready(answer: Result<Session, SessionError>) -> Self {
        Self {
            answer,
            release: tokio::sync::Notify::new(),
            gated: false,
        }
    }

    /// Resolve only after [`release`](Self::release).
    pub fn gated(answer: Result<Session, SessionError>) -> Self {
        Self {
            answer,
            release: tokio::sync::Notify::new(),
            gated: true,
        }
    }

    /// Lets a gated resolver answer.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl SessionResolver for MockSessionResolver {
    async fn resolve(&self) -> Result<Session, SessionError> {
        if self.gated {
            self.release.notified().await;
        }
        self.answer.clone()
    }
}
