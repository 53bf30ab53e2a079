// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Common Test Utilities

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod mocks;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

use std::io::Write;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize test logging. Call this at the start of each test module.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("warn,sitegate=debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Writes a configuration document to a temp file with the given extension.
pub fn write_config(content: &str, extension: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("sitegate-")
        .suffix(&format!(".{}", extension))
        .tempfile()
        .expect("Failed to create temp config file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp config file");
    file
}
