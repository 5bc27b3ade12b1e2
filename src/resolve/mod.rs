//! Endpoint resolution for the UI layer.
//!
//! # Responsibilities
//! - Map a logical API path to the concrete URL to call
//! - Keep the same calling code working against a local dev backend, a
//!   same-origin production deployment, and a deployment whose backend must
//!   be tunneled through the relay
//! - Refuse malformed results outside production
//!
//! # Design Decisions
//! - Pure function over the injected config; no ambient state
//! - `/api/` paths are same-origin in production, dev-server-absolute otherwise
//! - A plaintext (`http://`) upstream in production is tunneled through the
//!   relay so the page never issues a mixed-content call

use thiserror::Error;

use crate::config::RelayConfig;

/// Mount prefix of the request relay.
pub const RELAY_PREFIX: &str = "/api/proxy";

/// Resolution produced a URL that cannot be sent.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid URL built from path \"{path}\": \"{url}\"")]
    MalformedUrl { path: String, url: String },
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Compute the concrete URL for a logical API path.
pub fn resolve(config: &RelayConfig, path: &str) -> String {
    if is_absolute(path) {
        return path.to_string();
    }

    let normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if normalized.starts_with("/api/") {
        if config.runtime.production {
            // Same-origin: the serving origin's own route handles it.
            return normalized;
        }
        return format!("{}{}", config.site.origin, normalized);
    }

    if config.runtime.production && config.upstream.base_url.starts_with("http://") {
        return format!("{RELAY_PREFIX}{normalized}");
    }

    format!("{}{}", config.upstream.base_url, normalized)
}

/// Resolve a path and verify the result is sendable.
///
/// Production resolutions are allowed to be same-origin relative URLs.
/// Outside production a non-absolute result means the configuration is
/// broken; it is logged and the call fails instead of going on the wire.
pub fn checked(config: &RelayConfig, path: &str) -> Result<String, ResolveError> {
    let url = resolve(config, path);
    if !config.runtime.production && !is_absolute(&url) {
        tracing::error!(path = %path, url = %url, "resolved URL is not absolute");
        return Err(ResolveError::MalformedUrl {
            path: path.to_string(),
            url,
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_config() -> RelayConfig {
        RelayConfig::default()
    }

    fn production_config(upstream: &str) -> RelayConfig {
        let mut config = RelayConfig::default();
        config.runtime.production = true;
        config.upstream.base_url = upstream.to_string();
        config
    }

    #[test]
    fn absolute_urls_pass_through_in_any_mode() {
        let url = "https://example.com/x";
        assert_eq!(resolve(&dev_config(), url), url);
        assert_eq!(resolve(&production_config("http://10.0.0.5:8080"), url), url);
    }

    #[test]
    fn api_path_is_same_origin_in_production() {
        let config = production_config("https://api.example.com");
        assert_eq!(
            resolve(&config, "/api/interview-prep/profile"),
            "/api/interview-prep/profile"
        );
    }

    #[test]
    fn api_path_gets_site_origin_outside_production() {
        assert_eq!(
            resolve(&dev_config(), "/api/interview-prep/profile"),
            "http://localhost:3000/api/interview-prep/profile"
        );
    }

    #[test]
    fn insecure_upstream_is_tunneled_in_production() {
        let config = production_config("http://10.0.0.5:8080");
        assert_eq!(
            resolve(&config, "/interview-prep/jd/upload"),
            "/api/proxy/interview-prep/jd/upload"
        );
    }

    #[test]
    fn secure_upstream_is_called_directly_in_production() {
        let config = production_config("https://api.example.com");
        assert_eq!(
            resolve(&config, "/interview-prep/jd/upload"),
            "https://api.example.com/interview-prep/jd/upload"
        );
    }

    #[test]
    fn backend_path_gets_upstream_base_outside_production() {
        assert_eq!(
            resolve(&dev_config(), "/plan/current"),
            "http://localhost:8080/plan/current"
        );
    }

    #[test]
    fn missing_leading_slash_is_normalized() {
        assert_eq!(
            resolve(&dev_config(), "plan/current"),
            "http://localhost:8080/plan/current"
        );
    }

    #[test]
    fn checked_rejects_relative_results_outside_production() {
        // A broken config slipping past load-time validation must not
        // produce a request to a malformed address.
        let mut config = dev_config();
        config.upstream.base_url = String::new();

        let err = checked(&config, "/plan/current").unwrap_err();
        let ResolveError::MalformedUrl { url, .. } = err;
        assert_eq!(url, "/plan/current");
    }

    #[test]
    fn checked_allows_same_origin_results_in_production() {
        let config = production_config("http://10.0.0.5:8080");
        assert_eq!(
            checked(&config, "/plan/current").unwrap(),
            "/api/proxy/plan/current"
        );
    }
}
