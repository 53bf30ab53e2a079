// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Path helpers shared by route rules and navigation items.

/// Strips the query string, fragment and trailing slash from a request path.
///
/// The root path stays `/`.
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Returns `true` if `path` is `prefix` or lies below it.
///
/// Matching is segment-based: `/admin` covers `/admin/users` but not
/// `/administer`. The root prefix only covers `/` itself.
pub fn is_within(prefix: &str, path: &str) -> bool {
    let prefix = normalize_path(prefix);
    let path = normalize_path(path);

    if prefix == "/" {
        return path == "/";
    }

    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}
