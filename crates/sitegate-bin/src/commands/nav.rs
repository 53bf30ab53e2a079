// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `nav` command.

use std::sync::Arc;

use sitegate_config::SiteGateConfig;
use sitegate_core::{normalize_role, NavigationItem, VisibilityFilter};

use crate::cli::{Cli, NavArgs, OutputFormat};
use crate::error::{BinError, BinResult};

/// Executes the `nav` command: prints the menu a role sees.
pub fn nav(cli: &Cli, args: NavArgs) -> BinResult<()> {
    let config = super::load_config(cli)?;
    let role = args.role.as_deref().map(normalize_role).unwrap_or_default();
    let items = visible(&config, &role)?;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&role, &items, args.current.as_deref())),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "role": role,
                "items": items
                    .iter()
                    .map(|item| serde_json::json!({
                        "name": item.name,
                        "icon_id": item.icon_id,
                        "path": item.path,
                        "active": args.current.as_deref().is_some_and(|c| item.is_active(c)),
                    }))
                    .collect::<Vec<_>>(),
            });
            let rendered = serde_json::to_string_pretty(&output)
                .map_err(|e| BinError::runtime(format!("Failed to render JSON: {}", e)))?;
            println!("{}", rendered);
        }
    }

    Ok(())
}

fn visible(config: &SiteGateConfig, role: &str) -> BinResult<Vec<NavigationItem>> {
    let filter = VisibilityFilter::new(
        Arc::new(config.catalog()?),
        Arc::new(config.access_policy()?),
    );
    Ok(filter.visible_for(role))
}

fn render_text(role: &str, items: &[NavigationItem], current: Option<&str>) -> String {
    let label = if role.is_empty() { "(none)" } else { role };
    let mut out = format!("Navigation for role {}:\n", label);
    for item in items {
        let marker = if current.is_some_and(|c| item.is_active(c)) { '*' } else { ' ' };
        out.push_str(&format!("  {} {:<12} {:<18} {}\n", marker, item.name, item.icon_id, item.path));
    }
    if items.is_empty() {
        out.push_str("  (no items)\n");
    }
    out
}
