// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Errors and exit codes of the `sitegate` binary.
//!
//! | Code | Cause                                   |
//! |------|-----------------------------------------|
//! | 1    | configuration rejected by validation    |
//! | 2    | startup failed (logging, app state)     |
//! | 3    | server task or output rendering failed  |
//! | 4    | configuration file missing or unreadable|
//! | 5    | `validate --strict` found warnings      |
//! | 6    | web layer error                         |
//! | 64   | bad command-line usage                  |

use thiserror::Error;

/// Result type alias for sitegate-bin operations.
pub type BinResult<T> = Result<T, BinError>;

/// Errors surfaced by `sitegate` commands.
#[derive(Debug, Error)]
pub enum BinError {
    /// The command line asks for something the command cannot do.
    #[error("Invalid argument: {0}")]
    Usage(String),

    /// The gate could not be brought up.
    #[error("Startup failed: {0}")]
    Startup(String),

    /// The command failed after startup.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Strict validation treats warnings as failures.
    #[error("Strict mode: {count} warning(s) found")]
    StrictWarnings {
        /// Number of warnings reported.
        count: usize,
    },

    /// Building or serving the web layer failed.
    #[error("Web error: {0}")]
    Web(#[from] sitegate_web::ApiError),

    /// Loading or validating the configuration failed.
    #[error("Config error: {0}")]
    Config(#[from] sitegate_config::ConfigError),

    /// Wraps another error with what the command was doing.
    #[error("{context}: {source}")]
    WithContext {
        /// What the command was doing.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<BinError>,
    },
}

impl BinError {
    /// Creates a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Creates a startup error.
    pub fn startup(msg: impl Into<String>) -> Self {
        Self::Startup(msg.into())
    }

    /// Creates a runtime error.
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    /// Wraps the error with context.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(e) if e.is_io_error() => 4,
            Self::Config(_) => 1,
            Self::Startup(_) => 2,
            Self::Runtime(_) => 3,
            Self::StrictWarnings { .. } => 5,
            Self::Web(_) => 6,
            Self::Usage(_) => 64,
            Self::WithContext { source, .. } => source.exit_code(),
        }
    }

    /// Short category for structured logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Usage(_) => "usage",
            Self::Startup(_) => "startup",
            Self::Runtime(_) => "runtime",
            Self::StrictWarnings { .. } => "strict_warnings",
            Self::Web(_) => "web",
            Self::Config(e) => e.error_type(),
            Self::WithContext { source, .. } => source.error_type(),
        }
    }
}

impl From<anyhow::Error> for BinError {
    fn from(err: anyhow::Error) -> Self {
        Self::Startup(format!("{:#}", err))
    }
}

// =============================================================================
// Reporting
// =============================================================================

/// Prints the error and its causes to stderr.
pub fn report_error(error: &BinError) {
    eprintln!("Error: {}", error);

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  Caused by: {}", cause);
        source = cause.source();
    }
}

/// Prints the error and exits with its code.
pub fn report_error_and_exit(error: BinError) -> ! {
    let code = error.exit_code();
    tracing::debug!(error_type = error.error_type(), exit_code = code, "Exiting with error");
    report_error(&error);
    std::process::exit(code)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_keeps_exit_code() {
        let err = BinError::StrictWarnings { count: 2 }.with_context("validating sitegate.yaml");
        assert_eq!(
            err.to_string(),
            "validating sitegate.yaml: Strict mode: 2 warning(s) found"
        );
        assert_eq!(err.exit_code(), 5);
        assert_eq!(err.error_type(), "strict_warnings");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(BinError::startup("state").exit_code(), 2);
        assert_eq!(BinError::runtime("join").exit_code(), 3);
        assert_eq!(BinError::usage("no path").exit_code(), 64);
        assert_eq!(
            BinError::from(sitegate_web::ApiError::internal("bind")).exit_code(),
            6
        );
    }

    #[test]
    fn test_config_exit_codes() {
        let err = BinError::from(sitegate_config::ConfigError::file_not_found("sitegate.yaml"))
            .with_context("Configuration validation failed");
        assert_eq!(err.exit_code(), 4);
        assert_eq!(err.error_type(), "file_not_found");

        let err = BinError::from(sitegate_config::ConfigError::validation("routes", "loop"));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.error_type(), "validation");
    }

    #[test]
    fn test_anyhow_keeps_context() {
        let err = anyhow::anyhow!("bad directive").context("initializing logging");
        let err = BinError::from(err);
        assert_eq!(
            err.to_string(),
            "Startup failed: initializing logging: bad directive"
        );
        assert_eq!(err.exit_code(), 2);
    }
}
