// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `version` command.

use crate::cli::Cli;
use crate::error::BinResult;

/// Executes the `version` command to display version information.
pub fn version(cli: &Cli) -> BinResult<()> {
    println!("SiteGate - navigation authorization gate");
    println!();
    println!("Version Information:");
    println!("  {}:    {}", crate::NAME, crate::VERSION);
    println!("  sitegate-core:   {}", sitegate_core::VERSION);
    println!("  sitegate-config: {}", sitegate_config::VERSION);
    println!("  sitegate-web:    {}", sitegate_web::VERSION);
    println!();
    if cli.is_verbose() {
        println!("Build Information:");
        println!("  Target:          {}", std::env::consts::ARCH);
        println!("  OS:              {}", std::env::consts::OS);
        println!();
    }
    println!("License: PolyForm Noncommercial License 1.0.0");
    println!("Copyright (c) 2025 Sylvex. All rights reserved.");

    Ok(())
}
