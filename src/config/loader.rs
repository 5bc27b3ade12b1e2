//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file, apply environment overrides, and
/// validate the result.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RelayConfig = toml::from_str(&content)?;
    finish(config, |name| std::env::var(name).ok())
}

/// Build configuration from defaults plus environment overrides alone.
pub fn from_env() -> Result<RelayConfig, ConfigError> {
    finish(RelayConfig::default(), |name| std::env::var(name).ok())
}

fn finish(
    mut config: RelayConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<RelayConfig, ConfigError> {
    apply_overrides(&mut config, env);
    normalize(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Environment variables win over file values. The lookup is injected so
/// tests can exercise overrides without touching process-global state.
fn apply_overrides(config: &mut RelayConfig, env: impl Fn(&str) -> Option<String>) {
    if let Some(value) = env("API_URL").filter(|v| !v.is_empty()) {
        config.upstream.base_url = value;
    }
    if let Some(value) = env("SITE_URL").filter(|v| !v.is_empty()) {
        config.site.origin = value;
    }
    if let Some(value) = env("BIND_ADDRESS").filter(|v| !v.is_empty()) {
        config.listener.bind_address = value;
    }
    if let Some(value) = env("APP_ENV") {
        config.runtime.production = value == "production";
    }
}

/// Base URLs are concatenated with `/`-prefixed paths, so trailing slashes
/// would produce `//` in resolved URLs.
fn normalize(config: &mut RelayConfig) {
    truncate_trailing_slash(&mut config.upstream.base_url);
    truncate_trailing_slash(&mut config.site.origin);
}

fn truncate_trailing_slash(url: &mut String) {
    while url.ends_with('/') {
        url.pop();
    }
}
