// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! - `serve`: Start the web server
//! - `validate`: Validate configuration file
//! - `nav`: Print the visible navigation for a role
//! - `check`: Print the guard decision for a path
//! - `version`: Show version information

mod check;
mod nav;
mod serve;
mod validate;
mod version;

pub use check::check;
pub use nav::nav;
pub use serve::serve;
pub use validate::validate;
pub use version::version;

use sitegate_config::{ConfigLoader, SiteGateConfig};

use crate::cli::{Cli, Commands};
use crate::error::BinResult;

/// Executes the appropriate command based on CLI arguments.
pub async fn execute(cli: Cli) -> BinResult<()> {
    match cli.effective_command() {
        Commands::Serve(args) => serve::serve(&cli, args).await,
        Commands::Validate(args) => validate::validate(&cli, args),
        Commands::Nav(args) => nav::nav(&cli, args),
        Commands::Check(args) => check::check(&cli, args),
        Commands::Version => version::version(&cli),
    }
}

/// Loads the configuration named on the command line, or the defaults.
pub(crate) fn load_config(cli: &Cli) -> BinResult<SiteGateConfig> {
    Ok(ConfigLoader::new().load_or_default(cli.config.as_deref())?)
}
