//! Shared utilities for relay and client integration tests.

use std::net::SocketAddr;

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use api_relay::{RelayConfig, RelayServer};

/// Start an echo backend on an ephemeral port.
///
/// Routes:
/// - any `/echo` and `/echo/{*rest}`: JSON with method, path, query, headers
///   and body as received
/// - `/redirect`: 302 with a Location header
/// - `/compressed`: 200 declaring a content-encoding it never applied
/// - `/empty`: 204
/// - `/plain` and `/plain-empty`: JSON text (or nothing) under `text/plain`
/// - `/error`: 500 with a plain body
pub async fn start_echo_backend() -> SocketAddr {
    let app = Router::new()
        .route("/echo", any(echo))
        .route("/echo/{*rest}", any(echo))
        .route("/redirect", get(redirect))
        .route("/compressed", get(compressed))
        .route("/empty", get(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/plain",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "text/plain")],
                    r#"{"weeks":4,"focus":"system design"}"#,
                )
            }),
        )
        .route(
            "/plain-empty",
            get(|| async { ([(header::CONTENT_TYPE, "text/plain")], "") }),
        )
        .route(
            "/error",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded") }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Start a relay on an ephemeral port, forwarding to the given upstream.
#[allow(dead_code)]
pub async fn start_relay(upstream: SocketAddr) -> SocketAddr {
    let mut config = RelayConfig::default();
    config.upstream.base_url = format!("http://{upstream}");

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        RelayServer::new(config).run(listener).await.unwrap();
    });

    addr
}

/// Client that does not follow redirects, so raw 3xx relaying is observable.
#[allow(dead_code)]
pub fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

async fn echo(request: Request) -> Json<Value> {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, 1024 * 1024).await.unwrap();

    let headers: serde_json::Map<String, Value> = parts
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
            )
        })
        .collect();

    Json(json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/moved")])
}

async fn compressed() -> impl IntoResponse {
    (
        [
            (header::CONTENT_ENCODING, "gzip"),
            (header::CONTENT_TYPE, "text/plain"),
        ],
        "plain text that was never compressed",
    )
}
