// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Dashboard shell.
//!
//! Serves the page frame for every guarded path that reached the router.
//! The guard middleware has already decided the request may render; the
//! shell only lays out the menu the session is allowed to see.

use std::fmt::Write as _;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use sitegate_core::{path::is_within, Link, NavigationItem, Session};

use crate::context::GateSession;
use crate::state::AppState;

/// Fallback handler rendering the dashboard shell.
pub async fn shell(
    State(state): State<AppState>,
    GateSession(session): GateSession,
    uri: Uri,
) -> Response {
    let path = uri.path();

    if is_within(state.policy.auth_path(), path) {
        return Html(sign_in_page(&session)).into_response();
    }

    let Some(page) = state.catalog.items().iter().find(|item| item.is_active(path)) else {
        let nav = state.visibility().visible_for_session(&session);
        return (StatusCode::NOT_FOUND, Html(page_html("Not found", &nav, path, &session)))
            .into_response();
    };

    let nav = state.visibility().visible_for_session(&session);
    Html(page_html(&page.name, &nav, path, &session)).into_response()
}

fn sign_in_page(session: &Session) -> String {
    let status = if session.is_authenticated {
        "You are signed in."
    } else {
        "Sign in to continue."
    };
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>Sign in</title></head>\
         <body><main class=\"gate-auth\"><h1>Sign in</h1><p>{}</p></main></body></html>",
        escape(status)
    )
}

fn page_html(title: &str, nav: &[NavigationItem], current: &str, session: &Session) -> String {
    let mut html = String::with_capacity(1024);
    let _ = write!(
        html,
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{}</title></head><body>",
        escape(title)
    );

    html.push_str("<nav class=\"gate-nav\"><ul>");
    for item in nav {
        let link = Link::new(item.path.as_str());
        html.push_str("<li><a");
        for (name, value) in link.attributes() {
            let _ = write!(html, " {}=\"{}\"", name, escape(&value));
        }
        let _ = write!(html, " data-icon=\"{}\"", escape(&item.icon_id));
        if item.is_active(current) {
            html.push_str(" aria-current=\"page\"");
        }
        let _ = write!(html, ">{}</a></li>", escape(&item.name));
    }
    html.push_str("</ul></nav>");

    let _ = write!(
        html,
        "<main class=\"gate-content\" data-role=\"{}\"><h1>{}</h1></main></body></html>",
        escape(&session.role()),
        escape(title)
    );
    html
}

/// Escapes text for HTML content and quoted attribute values.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use sitegate_core::User;

    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_page_marks_active_item() {
        let nav = vec![
            NavigationItem::new("Reports", "file-text", "/reports"),
            NavigationItem::new("AI", "bot", "/ai"),
        ];
        let session = Session::authenticated(User::new("worker"));
        let html = page_html("Reports", &nav, "/reports/daily", &session);

        assert!(html.contains("<a href=\"/reports\" data-icon=\"file-text\" aria-current=\"page\">Reports</a>"));
        assert!(html.contains("<a href=\"/ai\" data-icon=\"bot\">AI</a>"));
        assert!(html.contains("data-role=\"worker\""));
    }
}
