// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loading for SiteGate.
//!
//! # Loading Pipeline
//!
//! 1. Read the file (YAML, TOML or JSON by extension)
//! 2. Resolve `${VAR}` / `${VAR:default}` placeholders
//! 3. Parse into [`SiteGateConfig`]
//! 4. Apply environment variable overrides
//! 5. Validate
//!
//! # Environment Variable Override
//!
//! ```text
//! SITEGATE_SERVER_PORT=9090
//! SITEGATE_LOG_LEVEL=debug
//! SITEGATE_AUTH_PATH=/login
//! ```

use std::env;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{LogLevel, SiteGateConfig};

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "SITEGATE";

// =============================================================================
// ConfigLoader
// =============================================================================

/// Configuration loader for SiteGate.
///
/// # Examples
///
/// ```no_run
/// use sitegate_config::loader::ConfigLoader;
///
/// let config = ConfigLoader::new().load("sitegate.yaml").unwrap();
/// println!("Listening on {}", config.server.socket_addr());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_prefix: String,
    resolve_env_vars: bool,
}

impl ConfigLoader {
    /// Creates a loader with default settings.
    pub fn new() -> Self {
        Self {
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            resolve_env_vars: true,
        }
    }

    /// Sets the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Enables or disables placeholders and overrides from the environment.
    pub fn with_env_vars(mut self, enabled: bool) -> Self {
        self.resolve_env_vars = enabled;
        self
    }

    /// Loads configuration from a file.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<SiteGateConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = self.read_file(path)?;
        let format = ConfigFormat::from_path(path)?;

        let mut config = self
            .parse_content(&content, format)
            .map_err(|e| match e {
                ConfigError::Serialization { message } => ConfigError::parse(path, message),
                other => other,
            })?;

        self.finish(&mut config)?;

        debug!(
            routes = config.routes.len(),
            navigation_items = config.navigation.items.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Loads configuration from a string.
    pub fn load_from_str(
        &self,
        content: &str,
        format: ConfigFormat,
    ) -> ConfigResult<SiteGateConfig> {
        let mut config = self.parse_content(content, format)?;
        self.finish(&mut config)?;
        Ok(config)
    }

    /// Loads from `path` if given, otherwise uses the built-in defaults.
    ///
    /// Environment overrides apply either way.
    pub fn load_or_default(&self, path: Option<&Path>) -> ConfigResult<SiteGateConfig> {
        match path {
            Some(path) => self.load(path),
            None => {
                info!("No configuration file given, using built-in defaults");
                let mut config = SiteGateConfig::default();
                self.finish(&mut config)?;
                Ok(config)
            }
        }
    }

    fn finish(&self, config: &mut SiteGateConfig) -> ConfigResult<()> {
        if self.resolve_env_vars {
            self.apply_env_overrides(config)?;
        }
        config.validate()
    }

    fn read_file(&self, path: &Path) -> ConfigResult<String> {
        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }
        fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))
    }

    fn parse_content(&self, content: &str, format: ConfigFormat) -> ConfigResult<SiteGateConfig> {
        let content = if self.resolve_env_vars {
            resolve_env_placeholders(content)
        } else {
            content.to_string()
        };

        if content.trim().is_empty() {
            return Ok(SiteGateConfig::default());
        }

        match format {
            ConfigFormat::Yaml => parse_yaml(&content),
            ConfigFormat::Toml => {
                toml::from_str(&content).map_err(|e| ConfigError::serialization(e.to_string()))
            }
            ConfigFormat::Json => serde_json::from_str(&content)
                .map_err(|e| ConfigError::serialization(e.to_string())),
        }
    }

    fn env_name(&self, key: &str) -> String {
        format!("{}_{}", self.env_prefix, key)
    }

    fn apply_env_overrides(&self, config: &mut SiteGateConfig) -> ConfigResult<()> {
        let name = self.env_name("SERVER_PORT");
        if let Ok(value) = env::var(&name) {
            config.server.port = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_env_var(&name, "expected valid port number"))?;
        }

        let name = self.env_name("LOG_LEVEL");
        if let Ok(value) = env::var(&name) {
            config.logging.level = LogLevel::parse(&value).ok_or_else(|| {
                ConfigError::invalid_env_var(&name, "expected trace, debug, info, warn or error")
            })?;
        }

        let name = self.env_name("AUTH_PATH");
        if let Ok(value) = env::var(&name) {
            config.gate.auth_path = value.trim().to_string();
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ConfigFormat
// =============================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format.
    Yaml,
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl ConfigFormat {
    /// Determines the format from a file path.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(other) => Err(ConfigError::unsupported_format(other)),
            None => Err(ConfigError::unsupported_format("(no extension)")),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Resolves `${VAR}` and `${VAR:default}` placeholders.
///
/// An unset variable without a default is left as written.
fn resolve_env_placeholders(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find('}') else {
            result.push_str(&rest[start..]);
            return result;
        };

        let body = &after[..end];
        let (name, default) = match body.split_once(':') {
            Some((name, default)) => (name, Some(default)),
            None => (body, None),
        };

        match (env::var(name), default) {
            (Ok(value), _) => result.push_str(&value),
            (Err(_), Some(default)) => result.push_str(default),
            (Err(_), None) => {
                warn!("Environment variable '{}' not found", name);
                result.push_str(&rest[start..start + 2 + end + 1]);
            }
        }

        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}

/// YAML parsing through the config crate.
fn parse_yaml<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(content, config::FileFormat::Yaml))
        .build()
        .map_err(|e| ConfigError::serialization(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::serialization(e.to_string()))
}

// =============================================================================
// Convenience Functions
// =============================================================================

/// Loads configuration from a file with default settings.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<SiteGateConfig> {
    ConfigLoader::new().load(path)
}

/// Loads configuration from a string with the specified format.
pub fn load_config_str(content: &str, format: ConfigFormat) -> ConfigResult<SiteGateConfig> {
    ConfigLoader::new().load_from_str(content, format)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use sitegate_core::TransitionMode;
    use tempfile::NamedTempFile;

    use super::*;

    const SAMPLE_YAML: &str = r#"
server:
  port: 9090
  request_timeout: 15s

gate:
  auth_path: /login
  transition: immediate

routes:
  - path: /admin
    allowed_roles: [admin, engineer]
  - path: /finance
    allowed_roles: [admin]
    redirect_to: /reports

public_paths:
  - /health

navigation:
  restricted_role: worker
  items:
    - { name: Dashboard, icon_id: layout-dashboard, path: / }
    - { name: Reports, icon_id: file-bar-chart, path: /reports }
    - { name: Finance, icon_id: wallet, path: /finance }
  restricted: [/reports]

logging:
  level: debug
  format: json
"#;

    fn loader() -> ConfigLoader {
        ConfigLoader::new().with_env_prefix("SITEGATE_LOADER_TEST")
    }

    #[test]
    fn test_load_yaml() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(SAMPLE_YAML.as_bytes()).unwrap();

        let config = loader().load(file.path()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.request_timeout, Duration::from_secs(15));
        assert_eq!(config.gate.auth_path, "/login");
        assert_eq!(config.gate.transition, TransitionMode::Immediate);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.logging.level, LogLevel::Debug);

        let policy = config.access_policy().unwrap();
        assert!(policy.is_public("/login"));
        assert_eq!(
            policy.rule_for("/finance/q3").map(|r| r.policy.redirect_to()),
            Some("/reports")
        );

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.restricted().len(), 1);
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let file = NamedTempFile::with_suffix(".yaml").unwrap();
        let config = loader().load(file.path()).unwrap();
        assert_eq!(config.navigation.items.len(), 7);
        assert_eq!(config.routes[0].path, "/admin");
    }

    #[test]
    fn test_load_toml() {
        let toml = r#"
[server]
port = 8181

[[routes]]
path = "/admin"
allowed_roles = ["admin"]
"#;
        let config = loader().load_from_str(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.server.port, 8181);
        assert_eq!(config.routes[0].allowed_roles, vec!["admin"]);
    }

    #[test]
    fn test_load_json() {
        let json = r#"{ "gate": { "auth_path": "/signin" } }"#;
        let config = loader().load_from_str(json, ConfigFormat::Json).unwrap();
        assert_eq!(config.gate.auth_path, "/signin");
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(br#"{ "gaet": {} }"#).unwrap();
        assert!(matches!(
            loader().load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_redirect_loop_rejected() {
        let yaml = r#"
routes:
  - { path: /admin, allowed_roles: [admin], redirect_to: /finance }
  - { path: /finance, allowed_roles: [engineer], redirect_to: /admin }
"#;
        let result = loader().load_from_str(yaml, ConfigFormat::Yaml);
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("SITEGATE_OVERRIDE_TEST_SERVER_PORT", "7070");
        env::set_var("SITEGATE_OVERRIDE_TEST_AUTH_PATH", "/sso");

        let config = ConfigLoader::new()
            .with_env_prefix("SITEGATE_OVERRIDE_TEST")
            .load_or_default(None)
            .unwrap();
        assert_eq!(config.server.port, 7070);
        assert_eq!(config.gate.auth_path, "/sso");

        env::remove_var("SITEGATE_OVERRIDE_TEST_SERVER_PORT");
        env::remove_var("SITEGATE_OVERRIDE_TEST_AUTH_PATH");
    }

    #[test]
    fn test_invalid_env_override() {
        env::set_var("SITEGATE_BADPORT_TEST_SERVER_PORT", "eighty");
        let result = ConfigLoader::new()
            .with_env_prefix("SITEGATE_BADPORT_TEST")
            .load_or_default(None);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
        env::remove_var("SITEGATE_BADPORT_TEST_SERVER_PORT");
    }

    #[test]
    fn test_env_placeholder_with_default() {
        let result = resolve_env_placeholders("auth_path: ${SITEGATE_UNSET_VAR:/login}");
        assert_eq!(result, "auth_path: /login");

        let result = resolve_env_placeholders("x: ${SITEGATE_UNSET_VAR} y: ${unterminated");
        assert_eq!(result, "x: ${SITEGATE_UNSET_VAR} y: ${unterminated");
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("sitegate.yml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("sitegate.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert!(ConfigFormat::from_path(Path::new("sitegate.ini")).is_err());
    }

    #[test]
    fn test_file_not_found() {
        let result = loader().load("/nonexistent/sitegate.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }
}
