//! Semantic configuration checks.
//!
//! Serde handles syntax; this module rejects configs that parse but cannot
//! work: unparseable bind addresses, relative base URLs, a zero body limit.
//! All problems are collected so the operator sees everything at once.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    BindAddress(String),

    #[error("{field} must be an absolute http(s) URL, got '{value}'")]
    BaseUrl { field: &'static str, value: String },

    #[error("listener.max_body_bytes must be non-zero")]
    BodyLimit,
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    for (field, value) in [
        ("upstream.base_url", &config.upstream.base_url),
        ("site.origin", &config.site.origin),
    ] {
        if !is_http_url(value) {
            errors.push(ValidationError::BaseUrl {
                field,
                value: value.clone(),
            });
        }
    }

    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::BodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(value: &str) -> bool {
    matches!(Url::parse(value), Ok(url) if url.scheme() == "http" || url.scheme() == "https")
}
