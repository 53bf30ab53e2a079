// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! SiteGate - navigation authorization gate
//!
//! Main binary entry point.

use sitegate_bin::{
    commands,
    error::report_error_and_exit,
    init_logging, BinError, Cli,
};
use sitegate_config::{ConfigLoader, LoggingConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Logging settings may come from the config file; errors in it are
    // reported by the command itself.
    let file_logging = ConfigLoader::new()
        .load_or_default(cli.config.as_deref())
        .map(|config| config.logging)
        .unwrap_or_else(|_| LoggingConfig::default());

    if let Err(e) = init_logging(
        &cli.effective_log_level(&file_logging),
        cli.effective_log_format(&file_logging),
    ) {
        report_error_and_exit(BinError::from(e));
    }

    if let Err(e) = commands::execute(cli).await {
        report_error_and_exit(e);
    }
}
