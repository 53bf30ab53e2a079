// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Transition navigator.
//!
//! Path changes go through a [`ViewTransition`] selected once at startup:
//!
//! - [`AnimatedTransition`] wraps the update in the host's animated
//!   primitive ([`TransitionHost`]) and falls back to an immediate update if
//!   the primitive fails
//! - [`ImmediateTransition`] applies the update synchronously
//!
//! The update itself is a [`PendingUpdate`]: it runs at most once, and if
//! the host drops it without running it, it is applied on drop. Either way
//! the router ends up on the requested path.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::error::TransitionError;
use crate::guard::{GuardDecision, GuardOutcome};

// =============================================================================
// TransitionRequest
// =============================================================================

/// A single navigation action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// Destination path.
    pub target_path: String,
    /// Replace the current history entry instead of pushing.
    pub replace: bool,
}

impl TransitionRequest {
    /// A request that pushes a new history entry.
    pub fn push(path: impl Into<String>) -> Self {
        Self {
            target_path: path.into(),
            replace: false,
        }
    }

    /// A request that replaces the current history entry.
    pub fn replace(path: impl Into<String>) -> Self {
        Self {
            target_path: path.into(),
            replace: true,
        }
    }
}

// =============================================================================
// HistoryRouter
// =============================================================================

/// The external router that owns the current path and history stack.
pub trait HistoryRouter: Send + Sync {
    /// Applies a navigation.
    fn navigate(&self, request: &TransitionRequest);

    /// Returns the current path.
    fn current_path(&self) -> String;
}

#[derive(Debug)]
struct HistoryState {
    entries: Vec<String>,
    index: usize,
}

/// In-memory history stack.
#[derive(Debug)]
pub struct MemoryHistory {
    state: RwLock<HistoryState>,
}

impl MemoryHistory {
    /// Creates a history positioned at `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(HistoryState {
                entries: vec![initial.into()],
                index: 0,
            }),
        }
    }

    /// Pushes a new entry, discarding any forward entries.
    pub fn push(&self, path: impl Into<String>) {
        let mut state = self.state.write();
        let next = state.index + 1;
        state.entries.truncate(next);
        state.entries.push(path.into());
        state.index = next;
    }

    /// Replaces the current entry.
    pub fn replace(&self, path: impl Into<String>) {
        let mut state = self.state.write();
        let index = state.index;
        state.entries[index] = path.into();
    }

    /// Moves back one entry and returns the new current path.
    pub fn back(&self) -> Option<String> {
        let mut state = self.state.write();
        if state.index == 0 {
            return None;
        }
        state.index -= 1;
        Some(state.entries[state.index].clone())
    }

    /// Returns the entries up to and including the current one.
    pub fn entries(&self) -> Vec<String> {
        let state = self.state.read();
        state.entries[..=state.index].to_vec()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl HistoryRouter for MemoryHistory {
    fn navigate(&self, request: &TransitionRequest) {
        if request.replace {
            self.replace(request.target_path.clone());
        } else {
            self.push(request.target_path.clone());
        }
    }

    fn current_path(&self) -> String {
        let state = self.state.read();
        state.entries[state.index].clone()
    }
}

// =============================================================================
// PendingUpdate
// =============================================================================

type UpdateFn = Box<dyn FnOnce() + Send>;

struct UpdateSlot {
    update: Mutex<Option<UpdateFn>>,
}

impl Drop for UpdateSlot {
    fn drop(&mut self) {
        if let Some(update) = self.update.get_mut().take() {
            tracing::warn!("View transition dropped its update, applying immediately");
            update();
        }
    }
}

/// A path update that runs at most once.
///
/// Clones share the same update. Dropping the last clone without running it
/// applies the update.
#[derive(Clone)]
pub struct PendingUpdate {
    slot: Arc<UpdateSlot>,
}

impl PendingUpdate {
    /// Wraps an update closure.
    pub fn new(update: impl FnOnce() + Send + 'static) -> Self {
        Self {
            slot: Arc::new(UpdateSlot {
                update: Mutex::new(Some(Box::new(update))),
            }),
        }
    }

    /// Runs the update if it has not run yet. Returns `true` if it ran now.
    pub fn run(&self) -> bool {
        let update = self.slot.update.lock().take();
        match update {
            Some(update) => {
                update();
                true
            }
            None => false,
        }
    }

    /// Returns `true` once the update has run.
    pub fn is_applied(&self) -> bool {
        self.slot.update.lock().is_none()
    }
}

impl std::fmt::Debug for PendingUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingUpdate")
            .field("applied", &self.is_applied())
            .finish()
    }
}

// =============================================================================
// ViewTransition
// =============================================================================

/// How a navigation was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionOutcome {
    /// Handed to the host's animated primitive.
    Animated,
    /// Applied synchronously.
    Immediate,
    /// The animated primitive failed; applied synchronously instead.
    Fallback,
}

/// Transition mode selected at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionMode {
    /// Use the host's animated primitive when one exists.
    #[default]
    Animated,
    /// Always navigate immediately.
    Immediate,
}

/// The host environment's animated-transition primitive.
pub trait TransitionHost: Send + Sync {
    /// Starts an animated transition that applies `update`.
    ///
    /// The host may run the update later; returning an error means the
    /// transition did not start.
    fn start_view_transition(&self, update: PendingUpdate) -> Result<(), TransitionError>;
}

/// Strategy for applying a path update.
pub trait ViewTransition: Send + Sync {
    /// Applies the update. Never fails from the caller's perspective.
    fn apply(&self, update: PendingUpdate) -> TransitionOutcome;

    /// Returns the mode this strategy implements.
    fn mode(&self) -> TransitionMode;
}

/// Applies updates synchronously.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateTransition;

impl ViewTransition for ImmediateTransition {
    fn apply(&self, update: PendingUpdate) -> TransitionOutcome {
        update.run();
        TransitionOutcome::Immediate
    }

    fn mode(&self) -> TransitionMode {
        TransitionMode::Immediate
    }
}

/// Wraps updates in the host's animated primitive.
pub struct AnimatedTransition {
    host: Arc<dyn TransitionHost>,
}

impl AnimatedTransition {
    /// Creates an animated transition over a host primitive.
    pub fn new(host: Arc<dyn TransitionHost>) -> Self {
        Self { host }
    }
}

impl ViewTransition for AnimatedTransition {
    fn apply(&self, update: PendingUpdate) -> TransitionOutcome {
        match self.host.start_view_transition(update.clone()) {
            Ok(()) => TransitionOutcome::Animated,
            Err(e) => {
                tracing::warn!(error = %e, "View transition failed, navigating immediately");
                update.run();
                TransitionOutcome::Fallback
            }
        }
    }

    fn mode(&self) -> TransitionMode {
        TransitionMode::Animated
    }
}

impl std::fmt::Debug for AnimatedTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedTransition").finish_non_exhaustive()
    }
}

/// Picks the transition strategy once, at startup.
pub fn select_transition(
    mode: TransitionMode,
    host: Option<Arc<dyn TransitionHost>>,
) -> Arc<dyn ViewTransition> {
    match (mode, host) {
        (TransitionMode::Animated, Some(host)) => Arc::new(AnimatedTransition::new(host)),
        (TransitionMode::Animated, None) => {
            tracing::info!("No view transition host available, using immediate navigation");
            Arc::new(ImmediateTransition)
        }
        (TransitionMode::Immediate, _) => Arc::new(ImmediateTransition),
    }
}

// =============================================================================
// TransitionNavigator
// =============================================================================

/// Performs path changes through the selected transition strategy.
#[derive(Clone)]
pub struct TransitionNavigator {
    router: Arc<dyn HistoryRouter>,
    transition: Arc<dyn ViewTransition>,
}

impl TransitionNavigator {
    /// Creates a navigator.
    pub fn new(router: Arc<dyn HistoryRouter>, transition: Arc<dyn ViewTransition>) -> Self {
        Self { router, transition }
    }

    /// Creates a navigator that always navigates immediately.
    pub fn immediate(router: Arc<dyn HistoryRouter>) -> Self {
        Self::new(router, Arc::new(ImmediateTransition))
    }

    /// Navigates. The caller does not wait for an animated transition.
    pub fn navigate(&self, request: TransitionRequest) -> TransitionOutcome {
        tracing::trace!(
            target_path = %request.target_path,
            replace = request.replace,
            mode = ?self.transition.mode(),
            "Navigating"
        );

        let router = Arc::clone(&self.router);
        let update = PendingUpdate::new(move || router.navigate(&request));
        self.transition.apply(update)
    }

    /// Follows a guard redirect. Returns `None` when there is nothing to do.
    pub fn follow(&self, decision: &GuardDecision) -> Option<TransitionOutcome> {
        match &decision.outcome {
            GuardOutcome::Redirect(request) => Some(self.navigate(request.clone())),
            _ => None,
        }
    }

    /// Returns the router's current path.
    pub fn current_path(&self) -> String {
        self.router.current_path()
    }

    /// Returns the active transition mode.
    pub fn mode(&self) -> TransitionMode {
        self.transition.mode()
    }
}

impl std::fmt::Debug for TransitionNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionNavigator")
            .field("mode", &self.transition.mode())
            .field("current_path", &self.router.current_path())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
