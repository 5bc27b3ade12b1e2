//! Relay server setup and the forwarding handler.
//!
//! # Responsibilities
//! - Create the Axum router mounting the relay prefix
//! - Wire up middleware (tracing, request ID)
//! - Forward requests to the upstream with a shared hyper client
//! - Stream upstream responses back, minus hop-by-hop hygiene
//!
//! # Design Decisions
//! - Exactly GET/POST/PUT/PATCH/DELETE are wired; anything else gets 405.
//!   Axum routes HEAD through GET handlers, so the handler turns HEAD away
//!   itself on top of the `MethodFilter` union.
//! - Target paths come from the raw request URI, not a `Path` capture, so
//!   percent-encoded segments cross the relay untouched.
//! - Single attempt, no retries, no configured timeout; redirects are
//!   relayed raw for the caller to follow
//! - Dropping the handler future on client disconnect cancels the in-flight
//!   upstream call, so nothing leaks past the inbound connection's lifetime

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{on, MethodFilter},
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::relay::error::RelayFailure;
use crate::relay::forward;
use crate::resolve::RELAY_PREFIX;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub client: Client<HttpConnector, Body>,
}

/// HTTP server hosting the request relay.
pub struct RelayServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl RelayServer {
    /// Create a new relay server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        let config = Arc::new(config);
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            config: config.clone(),
            client,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let verbs = MethodFilter::GET
            .or(MethodFilter::POST)
            .or(MethodFilter::PUT)
            .or(MethodFilter::PATCH)
            .or(MethodFilter::DELETE);

        Router::new()
            .route(RELAY_PREFIX, on(verbs, relay_handler))
            .route(&format!("{RELAY_PREFIX}/{{*path}}"), on(verbs, relay_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "relay starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("relay stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Forward one inbound request to the upstream and relay the response.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();

    // MethodFilter::GET also routes HEAD here; the relay wires exactly the
    // five verbs, so HEAD is turned away like any other unwired method.
    if parts.method == Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    // The raw (still percent-encoded) path is taken from the request URI
    // rather than a `Path` capture, which would decode it and corrupt
    // encoded segments on re-parse.
    let path = forward::raw_capture(parts.uri.path());
    let target = forward::target_url(&state.config.upstream.base_url, path, parts.uri.query());

    tracing::debug!(
        method = %parts.method,
        target_url = %target,
        "relaying request"
    );

    // Non-GET/HEAD bodies are buffered fully before forwarding; an empty
    // buffer is forwarded as no body rather than an explicit empty payload.
    let body_bytes = if forward::method_takes_body(&parts.method) {
        match axum::body::to_bytes(body, state.config.listener.max_body_bytes).await {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                tracing::warn!(target_url = %target, error = %err, "failed to read inbound body");
                return (StatusCode::BAD_REQUEST, "Failed to read request body").into_response();
            }
        }
    } else {
        None
    };

    let uri: Uri = match target.parse() {
        Ok(uri) => uri,
        Err(err) => {
            tracing::error!(target_url = %target, error = %err, "invalid target URL");
            return RelayFailure::new(err.to_string(), target).into_response();
        }
    };

    let mut builder = Request::builder().method(parts.method.clone()).uri(uri);
    if let Some(headers) = builder.headers_mut() {
        *headers = forward::forward_headers(&parts.headers);
    }

    let outbound_body = match body_bytes {
        Some(bytes) if !bytes.is_empty() => Body::from(bytes),
        _ => Body::empty(),
    };
    let outbound = match builder.body(outbound_body) {
        Ok(request) => request,
        Err(err) => {
            tracing::error!(target_url = %target, error = %err, "failed to build outbound request");
            return RelayFailure::new(err.to_string(), target).into_response();
        }
    };

    // The hyper client performs a single attempt: no redirect following and
    // no caching, so 3xx responses reach the caller untouched.
    match state.client.request(outbound).await {
        Ok(response) => {
            let (mut parts, body) = response.into_parts();
            // The body crossed the wire uncompressed (identity was forced on
            // the upstream hop); re-declaring an encoding would make it
            // unreadable for the final client.
            parts.headers.remove(header::CONTENT_ENCODING);
            Response::from_parts(parts, Body::new(body))
        }
        Err(err) => {
            tracing::error!(target_url = %target, error = %err, "upstream request failed");
            RelayFailure::new(err.to_string(), target).into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
