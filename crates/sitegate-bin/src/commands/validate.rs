// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use std::path::Path;

use sitegate_config::{load_config, SiteGateConfig};

use crate::cli::{Cli, OutputFormat, ValidateArgs};
use crate::error::{BinError, BinResult};

/// Executes the `validate` command to validate configuration.
pub fn validate(cli: &Cli, args: ValidateArgs) -> BinResult<()> {
    let config_path = cli
        .config
        .as_deref()
        .ok_or_else(|| BinError::usage("validate needs a configuration file (-c <path>)"))?;

    let config = load_config(config_path)
        .map_err(|e| BinError::from(e).with_context("Configuration validation failed"))?;
    let warnings = config.warnings();

    match args.format {
        OutputFormat::Text => print!("{}", render_text(config_path, &config, &warnings, &args)),
        OutputFormat::Json => println!("{}", render_json(config_path, &config, &warnings, &args)?),
    }

    if args.strict && !warnings.is_empty() {
        return Err(BinError::StrictWarnings {
            count: warnings.len(),
        });
    }

    Ok(())
}

fn render_text(
    path: &Path,
    config: &SiteGateConfig,
    warnings: &[String],
    args: &ValidateArgs,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("✓ Configuration is valid: {}\n\n", path.display()));
    out.push_str("Summary:\n");
    out.push_str(&format!("  Listen:          {}\n", config.server.socket_addr()));
    out.push_str(&format!("  Auth path:       {}\n", config.gate.auth_path));
    out.push_str(&format!("  Fallback path:   {}\n", config.gate.default_redirect));
    out.push_str(&format!("  Transition:      {:?}\n", config.gate.transition));
    out.push_str(&format!("  Guarded routes:  {}\n", config.routes.len()));
    out.push_str(&format!("  Public paths:    {}\n", config.public_paths.join(", ")));
    out.push_str(&format!("  Navigation:      {} item(s)\n", config.navigation.items.len()));
    out.push_str(&format!(
        "  Restricted tier: {} -> {}\n",
        config.navigation.restricted_role,
        config.navigation.restricted_paths().join(", ")
    ));

    if !warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for warning in warnings {
            out.push_str(&format!("  ⚠ {}\n", warning));
        }
    }

    if args.show_config {
        out.push_str("\nParsed configuration:\n");
        out.push_str(
            &serde_json::to_string_pretty(config)
                .unwrap_or_else(|_| "(serialization error)".to_string()),
        );
        out.push('\n');
    }

    out
}

fn render_json(
    path: &Path,
    config: &SiteGateConfig,
    warnings: &[String],
    args: &ValidateArgs,
) -> BinResult<String> {
    let output = serde_json::json!({
        "valid": true,
        "config_path": path.display().to_string(),
        "summary": {
            "listen": config.server.socket_addr().to_string(),
            "auth_path": config.gate.auth_path,
            "default_redirect": config.gate.default_redirect,
            "transition": config.gate.transition,
            "route_count": config.routes.len(),
            "public_paths": config.public_paths,
            "navigation_items": config.navigation.items.len(),
            "restricted_role": config.navigation.restricted_role,
            "restricted_paths": config.navigation.restricted_paths(),
        },
        "warnings": warnings,
        "config": if args.show_config { Some(config) } else { None },
    });

    serde_json::to_string_pretty(&output)
        .map_err(|e| BinError::runtime(format!("Failed to render JSON: {}", e)))
}
