use axum::{routing::get, Json, Router};
use serde_json::json;
use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/", get(|| async { "Pretend backend API is up" }))
        .route(
            "/interview-prep/profile",
            get(|| async { Json(json!({ "name": "Ada", "role": "Backend Engineer" })) }),
        )
        .route(
            "/plan/current",
            get(|| async { Json(json!({ "weeks": 4, "focus": "system design" })) }),
        );

    let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
    println!("Mock backend listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
