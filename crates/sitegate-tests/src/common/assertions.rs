// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Custom Test Assertions

use sitegate_core::{GuardDecision, GuardOutcome, GuardState, NavigationItem};

// =============================================================================
// Decision Assertions
// =============================================================================

/// Assertion extensions for guard decisions.
pub trait DecisionAssertions {
    /// Assert that the guarded content renders.
    fn assert_allowed(&self);

    /// Assert that a placeholder is shown while loading.
    fn assert_loading(&self);

    /// Assert a replacing redirect with the given state and target.
    fn assert_redirect(&self, state: GuardState, target: &str);
}

impl DecisionAssertions for GuardDecision {
    fn assert_allowed(&self) {
        assert_eq!(
            (self.state, &self.outcome),
            (GuardState::Allowed, &GuardOutcome::Render),
            "Expected an allowed render, got {:?}",
            self
        );
    }

    fn assert_loading(&self) {
        assert_eq!(
            (self.state, &self.outcome),
            (GuardState::Loading, &GuardOutcome::Placeholder),
            "Expected a loading placeholder, got {:?}",
            self
        );
    }

    fn assert_redirect(&self, state: GuardState, target: &str) {
        assert_eq!(self.state, state, "Unexpected guard state in {:?}", self);
        match &self.outcome {
            GuardOutcome::Redirect(request) => {
                assert_eq!(request.target_path, target, "Unexpected redirect target");
                assert!(request.replace, "Guard redirects must replace the history entry");
            }
            other => panic!("Expected a redirect to {}, got {:?}", target, other),
        }
    }
}

// =============================================================================
// Navigation Assertions
// =============================================================================

/// Assertion extensions for visible menus.
pub trait NavigationAssertions {
    /// Assert the exact item paths, in order.
    fn assert_paths(&self, expected: &[&str]);

    /// Assert that no item has the given path.
    fn assert_hidden(&self, path: &str);
}

impl NavigationAssertions for [NavigationItem] {
    fn assert_paths(&self, expected: &[&str]) {
        let actual: Vec<&str> = self.iter().map(|item| item.path.as_str()).collect();
        assert_eq!(actual, expected, "Unexpected navigation items");
    }

    fn assert_hidden(&self, path: &str) {
        assert!(
            self.iter().all(|item| item.path != path),
            "Expected {} to be hidden, menu was {:?}",
            path,
            self.iter().map(|item| &item.path).collect::<Vec<_>>()
        );
    }
}

impl NavigationAssertions for Vec<NavigationItem> {
    fn assert_paths(&self, expected: &[&str]) {
        self.as_slice().assert_paths(expected);
    }

    fn assert_hidden(&self, path: &str) {
        self.as_slice().assert_hidden(path);
    }
}
