// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built sessions, paths and configuration documents.

use sitegate_core::{Session, User};

// =============================================================================
// Session Fixtures
// =============================================================================

/// Fixture providing sessions for every role class.
pub struct SessionFixtures;

impl SessionFixtures {
    /// An authenticated admin.
    pub fn admin() -> Session {
        Self::with_role("admin")
    }

    /// An authenticated engineer.
    pub fn engineer() -> Session {
        Self::with_role("engineer")
    }

    /// An authenticated field worker.
    pub fn worker() -> Session {
        Self::with_role("worker")
    }

    /// An authenticated user with a role outside the vocabulary.
    pub fn editor() -> Session {
        Self::with_role("editor")
    }

    /// An authenticated user without a role.
    pub fn no_role() -> Session {
        Self::with_role("")
    }

    /// No session.
    pub fn anonymous() -> Session {
        Session::anonymous()
    }

    /// A session that is still resolving.
    pub fn loading() -> Session {
        Session::loading()
    }

    /// An authenticated user with a raw role string.
    pub fn with_role(role: &str) -> Session {
        Session::authenticated(
            User::new(role)
                .with_id(format!("user-{}", if role.is_empty() { "none" } else { role }))
                .with_name("Test User"),
        )
    }

    /// Every authenticated fixture, labelled.
    pub fn authenticated() -> Vec<(&'static str, Session)> {
        vec![
            ("admin", Self::admin()),
            ("engineer", Self::engineer()),
            ("worker", Self::worker()),
            ("editor", Self::editor()),
            ("no_role", Self::no_role()),
        ]
    }
}

// =============================================================================
// Path Fixtures
// =============================================================================

/// Fixture providing the dashboard's paths.
pub struct PathFixtures;

impl PathFixtures {
    /// Every item path of the built-in catalog, in menu order.
    pub const ITEMS: [&'static str; 7] = [
        "/",
        "/projects",
        "/tasks",
        "/materials",
        "/reports",
        "/ai",
        "/admin",
    ];

    /// Paths below the admin tree.
    pub const ADMIN_TREE: [&'static str; 4] = [
        "/admin",
        "/admin/",
        "/admin/users",
        "/admin/users/42?tab=roles",
    ];

    /// Paths that share a prefix with `/admin` but are outside its tree.
    pub const ADMIN_SIBLINGS: [&'static str; 2] = ["/administer", "/admins"];

    /// Paths that need no session.
    pub const PUBLIC: [&'static str; 3] = ["/auth", "/auth/callback", "/health"];
}

// =============================================================================
// Config Fixtures
// =============================================================================

/// Fixture providing configuration documents.
pub struct ConfigFixtures;

impl ConfigFixtures {
    /// A YAML document that spells out the built-in defaults.
    pub fn full_yaml() -> &'static str {
        r#"
server:
  host: 127.0.0.1
  port: 8088
  request_timeout: 15s
  shutdown_timeout: 5s

gate:
  auth_path: /auth
  default_redirect: /
  transition: animated

routes:
  - path: /admin
    allowed_roles: [admin, engineer]
    redirect_to: /

public_paths:
  - /auth
  - /health

navigation:
  restricted_role: worker
  items:
    - { name: Dashboard, icon_id: layout-dashboard, path: / }
    - { name: Projects, icon_id: folder-kanban, path: /projects }
    - { name: Tasks, icon_id: list-checks, path: /tasks }
    - { name: Materials, icon_id: package, path: /materials }
    - { name: Reports, icon_id: file-bar-chart, path: /reports }
    - { name: AI, icon_id: bot, path: /ai }
    - { name: Admin, icon_id: shield, path: /admin }
  restricted: [/reports, /ai]

logging:
  level: debug
  format: json
"#
    }

    /// A TOML document with a second guarded tree.
    pub fn finance_toml() -> &'static str {
        r#"
[gate]
transition = "immediate"

[[routes]]
path = "/admin"
allowed_roles = ["admin", "engineer"]

[[routes]]
path = "/reports/finance"
allowed_roles = ["admin"]
redirect_to = "/reports"
"#
    }

    /// A JSON document with only a port.
    pub fn port_only_json() -> &'static str {
        r#"{ "server": { "port": 9191 } }"#
    }

    /// Workers are denied `/reports` and sent to `/ai`, which is denied too.
    pub fn redirect_loop_yaml() -> &'static str {
        r#"
routes:
  - path: /reports
    allowed_roles: [admin, engineer]
    redirect_to: /ai
  - path: /ai
    allowed_roles: [admin, engineer]
    redirect_to: /reports
"#
    }

    /// The restricted tier names a path the catalog lacks.
    pub fn unknown_restricted_yaml() -> &'static str {
        r#"
navigation:
  restricted: [/reports, /payroll]
"#
    }

    /// A field the schema does not know.
    pub fn unknown_field_yaml() -> &'static str {
        r#"
gate:
  auth_path: /auth
  remember_me: true
"#
    }
}
