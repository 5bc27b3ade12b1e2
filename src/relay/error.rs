//! Relay failure reporting.
//!
//! Forwarding failures never surface as unhandled faults. The caller gets a
//! fixed 502 envelope carrying the underlying error and the literal URL that
//! was attempted, so a misconfigured upstream is diagnosable from the
//! response alone.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON envelope returned when forwarding fails.
#[derive(Debug, Serialize)]
pub struct RelayFailure {
    pub error: &'static str,
    pub details: String,
    #[serde(rename = "targetUrl")]
    pub target_url: String,
}

impl RelayFailure {
    pub fn new(details: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            error: "Failed to proxy request",
            details: details.into(),
            target_url: target_url.into(),
        }
    }
}

impl IntoResponse for RelayFailure {
    fn into_response(self) -> Response {
        (StatusCode::BAD_GATEWAY, Json(self)).into_response()
    }
}
