// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Transition-aware link.
//!
//! A [`Link`] routes plain primary clicks through the
//! [`TransitionNavigator`] and leaves everything else (modified clicks,
//! other buttons, explicit targets, already-handled events) to the host's
//! default behavior.

use serde::{Deserialize, Serialize};

use crate::transition::{TransitionNavigator, TransitionOutcome, TransitionRequest};

const NEW_CONTEXT_REL: [&str; 2] = ["noopener", "noreferrer"];

// =============================================================================
// Click events
// =============================================================================

/// Mouse button of a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Usually the left button.
    #[default]
    Primary,
    /// Usually the wheel button.
    Auxiliary,
    /// Usually the right button.
    Secondary,
}

/// Modifier keys held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Control key.
    pub ctrl: bool,
    /// Meta / command key.
    pub meta: bool,
    /// Alt / option key.
    pub alt: bool,
    /// Shift key.
    pub shift: bool,
}

impl Modifiers {
    /// Returns `true` if any modifier is held.
    pub fn any(&self) -> bool {
        self.ctrl || self.meta || self.alt || self.shift
    }
}

/// A click on a link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Button pressed.
    pub button: MouseButton,
    /// Modifier keys held.
    pub modifiers: Modifiers,
    /// An earlier handler already took over the click.
    pub default_prevented: bool,
}

impl ClickEvent {
    /// A plain primary click.
    pub fn primary() -> Self {
        Self::default()
    }

    /// The same click with a different button.
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    /// The same click with modifier keys.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The same click, already handled.
    pub fn prevented(mut self) -> Self {
        self.default_prevented = true;
        self
    }
}

/// What happened to a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "transition", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// The link took over and navigated.
    Navigated(TransitionOutcome),
    /// The host's default behavior applies.
    Default,
}

// =============================================================================
// Link
// =============================================================================

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    to: String,
    #[serde(default)]
    replace: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rel: Option<String>,
}

impl Link {
    /// Creates a link to `to`.
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            replace: false,
            target: None,
            rel: None,
        }
    }

    /// Replace the current history entry when followed.
    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Sets the browsing-context target (`_blank`, `_self`, a window name).
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Sets caller-supplied rel tokens.
    pub fn rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    /// Returns the destination.
    pub fn href(&self) -> &str {
        &self.to
    }

    /// Returns `true` when the link opens a new browsing context.
    ///
    /// `_blank` and named windows do. `_self`, `_parent` and `_top` reuse an
    /// existing one.
    pub fn opens_new_context(&self) -> bool {
        match self.target.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(target) => {
                target.eq_ignore_ascii_case("_blank") || !target.starts_with('_')
            }
        }
    }

    /// Returns the rel attribute to render.
    ///
    /// New-context links always carry `noopener noreferrer`. Caller tokens are
    /// kept in order and never duplicated.
    pub fn rel_attr(&self) -> Option<String> {
        let mut tokens: Vec<&str> = Vec::new();
        for token in self.rel.as_deref().unwrap_or("").split_whitespace() {
            if !tokens.iter().any(|t| t.eq_ignore_ascii_case(token)) {
                tokens.push(token);
            }
        }

        if self.opens_new_context() {
            for token in NEW_CONTEXT_REL {
                if !tokens.iter().any(|t| t.eq_ignore_ascii_case(token)) {
                    tokens.push(token);
                }
            }
        }

        if tokens.is_empty() {
            None
        } else {
            Some(tokens.join(" "))
        }
    }

    /// Returns the rendered anchor attributes, in order.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![("href", self.to.clone())];
        if let Some(target) = &self.target {
            attrs.push(("target", target.clone()));
        }
        if let Some(rel) = self.rel_attr() {
            attrs.push(("rel", rel));
        }
        attrs
    }

    /// Returns `true` if the link should take over this click.
    pub fn should_intercept(&self, event: &ClickEvent) -> bool {
        let same_context = match self.target.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(target) => target.eq_ignore_ascii_case("_self"),
        };

        event.button == MouseButton::Primary
            && !event.modifiers.any()
            && !event.default_prevented
            && same_context
    }

    /// Returns the navigation this link performs.
    pub fn request(&self) -> TransitionRequest {
        TransitionRequest {
            target_path: self.to.clone(),
            replace: self.replace,
        }
    }

    /// Handles a click.
    pub fn click(&self, event: &ClickEvent, navigator: &TransitionNavigator) -> ClickOutcome {
        if !self.should_intercept(event) {
            return ClickOutcome::Default;
        }
        ClickOutcome::Navigated(navigator.navigate(self.request()))
    }
}

// =============================================================================
// Tests
// =============================================================================
