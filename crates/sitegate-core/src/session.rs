// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session signal.
//!
//! The session is owned by an external authentication provider. This module
//! exposes it to the gate as an injected capability ([`SessionProvider`])
//! instead of module-level state:
//!
//! - [`Session`] / [`User`]: the resolved authentication state
//! - [`SessionSignal`]: a watch-backed signal that starts in the loading state
//!   and is resolved once at bootstrap and again on login or logout
//! - [`SessionResolver`]: the external provider's async resolution hook

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::SessionError;
use crate::role::{normalize_role, Role};

// =============================================================================
// User
// =============================================================================

/// The authenticated user as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Free-text role; compared case-insensitively.
    pub role: String,
    /// Provider user ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// Creates a user with the given role.
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            id: None,
            name: None,
            email: None,
        }
    }

    /// Sets the user ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns the role classified against the vocabulary.
    pub fn role_class(&self) -> Role {
        Role::classify(Some(&self.role))
    }
}

// =============================================================================
// Session
// =============================================================================

/// Authentication state of the client process.
///
/// While `loading` is set, no authorization decision may be finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Whether a valid session exists.
    pub is_authenticated: bool,
    /// Whether the provider is still resolving.
    pub loading: bool,
    /// The user, when authenticated.
    pub user: Option<User>,
}

impl Session {
    /// The unresolved session published before the provider answers.
    pub fn loading() -> Self {
        Self {
            is_authenticated: false,
            loading: true,
            user: None,
        }
    }

    /// A resolved session without a user.
    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            loading: false,
            user: None,
        }
    }

    /// A resolved session for an authenticated user.
    pub fn authenticated(user: User) -> Self {
        Self {
            is_authenticated: true,
            loading: false,
            user: Some(user),
        }
    }

    /// Returns the normalized role, or an empty string when there is none.
    pub fn role(&self) -> String {
        self.user
            .as_ref()
            .map(|u| normalize_role(&u.role))
            .unwrap_or_default()
    }

    /// Returns the role classified against the vocabulary.
    pub fn role_class(&self) -> Role {
        Role::classify(self.user.as_ref().map(|u| u.role.as_str()))
    }

    /// Returns the user ID for logging, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.id.as_deref())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

// =============================================================================
// Provider traits
// =============================================================================

/// Read access to the current session.
///
/// Guards and navigation filters take this capability explicitly.
pub trait SessionProvider: Send + Sync {
    /// Returns a snapshot of the current session.
    fn session(&self) -> Session;
}

impl SessionProvider for Session {
    fn session(&self) -> Session {
        self.clone()
    }
}

impl<T: SessionProvider + ?Sized> SessionProvider for Arc<T> {
    fn session(&self) -> Session {
        (**self).session()
    }
}

/// The external authentication provider's resolution hook.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Resolves the current session.
    async fn resolve(&self) -> Result<Session, SessionError>;
}

// =============================================================================
// SessionSignal
// =============================================================================

/// Watch-backed session signal.
///
/// Starts in the loading state. The provider publishes through
/// [`resolve`](Self::resolve); consumers read snapshots or subscribe for
/// change events.
///
/// Every write bumps a generation counter under the channel's lock. A
/// [`bootstrap`](Self::bootstrap) only publishes its answer if nothing else
/// was written while the resolver was pending, so a sign-out during
/// resolution is never overwritten by the older session.
#[derive(Debug, Clone)]
pub struct SessionSignal {
    sender: Arc<watch::Sender<Session>>,
    generation: Arc<AtomicU64>,
}

impl SessionSignal {
    /// Creates a signal in the loading state.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Session::loading());
        Self {
            sender: Arc::new(sender),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a signal that is already resolved.
    pub fn resolved(session: Session) -> Self {
        let signal = Self::new();
        signal.resolve(Ok(session));
        signal
    }

    /// Marks the session as loading again, e.g. during a login round-trip.
    pub fn begin_loading(&self) {
        self.publish(Session::loading());
    }

    /// Publishes the provider's answer.
    ///
    /// A failed resolution is published as an anonymous session, so the gate
    /// fails toward denial.
    pub fn resolve(&self, result: Result<Session, SessionError>) {
        self.publish(settle(result));
    }

    /// Runs a full resolution: loading, then the resolver's answer.
    ///
    /// The answer is dropped if the signal was written to while the resolver
    /// was pending; the returned snapshot is then that newer session.
    pub async fn bootstrap(&self, resolver: &dyn SessionResolver) -> Session {
        let started = self.publish(Session::loading());
        let session = settle(resolver.resolve().await);

        let published = self.sender.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != started {
                return false;
            }
            self.generation.fetch_add(1, Ordering::SeqCst);
            *current = session;
            true
        });
        if !published {
            tracing::debug!(generation = started, "Discarding superseded session resolution");
        }

        self.snapshot()
    }

    /// Publishes an unauthenticated session.
    pub fn sign_out(&self) {
        self.publish(Session::anonymous());
    }

    /// Returns the current session.
    pub fn snapshot(&self) -> Session {
        self.sender.borrow().clone()
    }

    /// Subscribes to session changes.
    pub fn subscribe(&self) -> SessionWatcher {
        SessionWatcher {
            receiver: self.sender.subscribe(),
        }
    }

    /// Writes a session and returns the generation it was written at.
    fn publish(&self, session: Session) -> u64 {
        let mut generation = 0;
        self.sender.send_modify(|current| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *current = session;
        });
        generation
    }
}

/// Turns a provider answer into a publishable session.
///
/// A failed resolution becomes an anonymous session, so the gate fails
/// toward denial.
fn settle(result: Result<Session, SessionError>) -> Session {
    let session = match result {
        Ok(mut session) => {
            session.loading = false;
            session
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session resolution failed, treating as unauthenticated");
            Session::anonymous()
        }
    };

    tracing::debug!(
        authenticated = session.is_authenticated,
        role = %session.role(),
        "Session resolved"
    );
    session
}

impl Default for SessionSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider for SessionSignal {
    fn session(&self) -> Session {
        self.snapshot()
    }
}

// =============================================================================
// SessionWatcher
// =============================================================================

/// Receives session change events.
#[derive(Debug)]
pub struct SessionWatcher {
    receiver: watch::Receiver<Session>,
}

impl SessionWatcher {
    /// Returns the latest session without waiting.
    pub fn current(&self) -> Session {
        self.receiver.borrow().clone()
    }

    /// Waits for the next change and returns the new session.
    pub async fn changed(&mut self) -> Result<Session, SessionError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// Waits until the session is no longer loading.
    pub async fn settled(&mut self) -> Result<Session, SessionError> {
        let session = self
            .receiver
            .wait_for(|s| !s.loading)
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(session.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================
