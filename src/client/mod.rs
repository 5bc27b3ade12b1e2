//! Typed HTTP client for the backend API.
//!
//! # Responsibilities
//! - Resolve every logical path through the endpoint resolver before sending
//! - JSON request/response plumbing for GET/POST/PUT/DELETE
//! - Multipart uploads (job-description files and the like)
//!
//! # Design Decisions
//! - Single attempt, fail-fast; the backend owns its own retry semantics
//! - Non-2xx responses surface as errors carrying status and body text
//! - 204 and empty bodies decode to `None`; this backend serves JSON text
//!   even under non-JSON content types, so non-empty bodies are always
//!   parsed as JSON

use reqwest::multipart::Form;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config::RelayConfig;
use crate::resolve::{self, ResolveError};

/// Error type for API calls.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("API {path} unreachable: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API {path} failed: {status} {body}")]
    Api {
        path: String,
        status: StatusCode,
        body: String,
    },

    #[error("API {path} returned an undecodable body: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Client for the backend API, routed through the endpoint resolver.
pub struct ApiClient {
    config: RelayConfig,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client over the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ClientError> {
        let url = resolve::checked(&self.config, path)?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| transport(path, source))?;
        decode(path, response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ClientError> {
        let url = resolve::checked(&self.config, path)?;
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|source| transport(path, source))?;
        decode(path, response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ClientError> {
        let url = resolve::checked(&self.config, path)?;
        let response = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(|source| transport(path, source))?;
        decode(path, response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ClientError> {
        let url = resolve::checked(&self.config, path)?;
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|source| transport(path, source))?;
        decode(path, response).await
    }

    /// POST a multipart form; the content type (with boundary) is set by the
    /// multipart encoder, not forced to JSON.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<Option<T>, ClientError> {
        let url = resolve::checked(&self.config, path)?;
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|source| transport(path, source))?;
        decode(path, response).await
    }
}

fn transport(path: &str, source: reqwest::Error) -> ClientError {
    ClientError::Transport {
        path: path.to_string(),
        source,
    }
}

async fn decode<T: DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
) -> Result<Option<T>, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            path: path.to_string(),
            status,
            body,
        });
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let text = response
        .text()
        .await
        .map_err(|source| transport(path, source))?;
    if text.is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| ClientError::Decode {
            path: path.to_string(),
            source,
        })
}
