// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! - `serve`: Start the server (default)
//! - `validate`: Validate configuration file
//! - `nav`: Print the navigation a role sees
//! - `check`: Print the guard decision for a path
//! - `version`: Show version information

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sitegate_config::LoggingConfig;

// =============================================================================
// Main CLI Structure
// =============================================================================

/// SiteGate - navigation authorization gate for the construction dashboard
///
/// Decides which pages a session may reach and which menu entries it sees.
#[derive(Parser, Debug)]
#[command(
    name = "sitegate",
    author = "Sylvex <contact@sylvex.io>",
    version = sitegate_core::VERSION,
    about = "Navigation authorization gate for the construction dashboard",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path (built-in defaults when omitted)
    #[arg(short, long, env = "SITEGATE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Log format (text, json, compact)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Enable quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands for the SiteGate CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the web server
    ///
    /// This is the default command when no subcommand is specified.
    Serve(ServeArgs),

    /// Validate the configuration file
    ///
    /// Parses and validates the configuration without starting the server.
    Validate(ValidateArgs),

    /// Print the navigation items visible to a role
    Nav(NavArgs),

    /// Print the guard decision for a path and session
    Check(CheckArgs),

    /// Show detailed version information
    Version,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `serve` command.
#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Override the configured port
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug, Default, Clone)]
pub struct ValidateArgs {
    /// Show parsed configuration after validation
    #[arg(short, long)]
    pub show_config: bool,

    /// Output format for validation results
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `nav` command.
#[derive(Args, Debug, Default, Clone)]
pub struct NavArgs {
    /// Role to evaluate (omit for a session without a role)
    #[arg(short, long)]
    pub role: Option<String>,

    /// Current path, marks the active item
    #[arg(long)]
    pub current: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `check` command.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Requested path
    #[arg(short, long)]
    pub path: String,

    /// Role of the authenticated session
    #[arg(short, long, required_unless_present_any = ["anonymous", "loading"])]
    pub role: Option<String>,

    /// Evaluate an unauthenticated session
    #[arg(long, conflicts_with_all = ["role", "loading"])]
    pub anonymous: bool,

    /// Evaluate a session that is still resolving
    #[arg(long, conflicts_with = "role")]
    pub loading: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

impl From<sitegate_config::LogFormat> for LogFormat {
    fn from(format: sitegate_config::LogFormat) -> Self {
        match format {
            sitegate_config::LogFormat::Text => LogFormat::Text,
            sitegate_config::LogFormat::Json => LogFormat::Json,
            sitegate_config::LogFormat::Compact => LogFormat::Compact,
        }
    }
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for programmatic parsing
    Json,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective command, defaulting to `Serve` if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Serve(ServeArgs::default()))
    }

    /// Check if verbose logging is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Get the effective log level.
    ///
    /// `-q` and `-v` win over `-l`, which wins over the config file.
    pub fn effective_log_level(&self, file: &LoggingConfig) -> String {
        if self.quiet {
            "warn".to_string()
        } else if self.verbose {
            "debug".to_string()
        } else {
            self.log_level
                .clone()
                .unwrap_or_else(|| file.level.as_str().to_string())
        }
    }

    /// Get the effective log format.
    pub fn effective_log_format(&self, file: &LoggingConfig) -> LogFormat {
        self.log_format.unwrap_or_else(|| file.format.into())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use sitegate_config::LogLevel;

    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["sitegate"]);
        assert!(cli.command.is_none());
        assert!(matches!(cli.effective_command(), Commands::Serve(_)));
    }

    #[test]
    fn test_serve_port() {
        let cli = Cli::parse_from(["sitegate", "serve", "-p", "9090"]);
        if let Some(Commands::Serve(args)) = cli.command {
            assert_eq!(args.port, Some(9090));
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_validate_command() {
        let cli = Cli::parse_from(["sitegate", "validate", "--strict", "-f", "json"]);
        if let Some(Commands::Validate(args)) = cli.command {
            assert!(args.strict);
            assert_eq!(args.format, OutputFormat::Json);
        } else {
            panic!("Expected Validate command");
        }
    }

    #[test]
    fn test_config_path_is_global() {
        let cli = Cli::parse_from(["sitegate", "nav", "-c", "/etc/sitegate/sitegate.yaml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/sitegate/sitegate.yaml")));
    }

    #[test]
    fn test_check_requires_a_session_kind() {
        assert!(Cli::try_parse_from(["sitegate", "check", "--path", "/admin"]).is_err());
        assert!(Cli::try_parse_from(["sitegate", "check", "--path", "/admin", "--anonymous"]).is_ok());
        assert!(Cli::try_parse_from(["sitegate", "check", "--path", "/", "--loading"]).is_ok());
        assert!(Cli::try_parse_from([
            "sitegate", "check", "--path", "/", "--role", "admin", "--anonymous"
        ])
        .is_err());
    }

    #[test]
    fn test_log_level_precedence() {
        let file = LoggingConfig {
            level: LogLevel::Error,
            ..Default::default()
        };

        let cli = Cli::parse_from(["sitegate"]);
        assert_eq!(cli.effective_log_level(&file), "error");

        let cli = Cli::parse_from(["sitegate", "-l", "trace"]);
        assert_eq!(cli.effective_log_level(&file), "trace");

        let cli = Cli::parse_from(["sitegate", "-l", "trace", "-q"]);
        assert_eq!(cli.effective_log_level(&file), "warn");

        let cli = Cli::parse_from(["sitegate", "-v"]);
        assert_eq!(cli.effective_log_level(&file), "debug");
    }

    #[test]
    fn test_log_format_falls_back_to_file() {
        let file = LoggingConfig {
            format: sitegate_config::LogFormat::Json,
            ..Default::default()
        };
        let cli = Cli::parse_from(["sitegate"]);
        assert_eq!(cli.effective_log_format(&file), LogFormat::Json);

        let cli = Cli::parse_from(["sitegate", "--log-format", "compact"]);
        assert_eq!(cli.effective_log_format(&file), LogFormat::Compact);
    }
}
