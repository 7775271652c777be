//! HTTP surface: refresh triggers, snapshot reads, liveness and metrics.
//! Thin boundary over the resource manager; no caching logic lives here.

use axum::{
    routing::get,
    Router,
    response::{IntoResponse, Response},
    extract::{Path, Query, State},
    http::{header, StatusCode},
};
use serde::Deserialize;
use tower_http::compression::CompressionLayer;

use crate::error::ResourceError;
use crate::metrics::MetricsSnapshot;
use crate::RescacheEngine;

pub async fn start_api_server(engine: RescacheEngine, host: &str, port: u16) {
    let app = Router::new()
        .route("/update-user/{id}", get(update_user))
        .route("/get-resources/{id}", get(get_resources))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(CompressionLayer::new())
        .with_state(engine);

    let addr = format!("{}:{}", host, port);
    tracing::info!("🌐 API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind API port");

    axum::serve(listener, app).await.expect("Failed to start API server");
}

// ========================================
// QUERY FLAGS
// ========================================

#[derive(Debug, Default, Deserialize)]
struct RefreshParams {
    #[serde(default)]
    demo: bool,
    #[serde(default)]
    wait: bool,
}

// ========================================
// HANDLERS
// ========================================

/// Trigger a refresh for one user. With `wait=true` the refresh runs
/// synchronously and the fresh payload is returned; otherwise it runs in the
/// background and the response only acknowledges the trigger.
async fn update_user(
    State(engine): State<RescacheEngine>,
    Path(user_id): Path<u32>,
    Query(params): Query<RefreshParams>,
) -> Response {
    if user_id == 0 {
        return (StatusCode::BAD_REQUEST, "Invalid user ID").into_response();
    }

    if params.wait {
        return match engine.resources.refresh_user(user_id, params.demo).await {
            Ok(()) => match engine.resources.get_resources(user_id, params.demo).await {
                Ok(data) => json_bytes(data),
                Err(e) => error_response(e),
            },
            Err(e) => error_response(e),
        };
    }

    let resources = engine.resources.clone();
    tokio::spawn(async move {
        if let Err(e) = resources.refresh_user(user_id, params.demo).await {
            tracing::error!("Triggered refresh failed for user {}: {}", user_id, e);
        }
    });

    format!(
        "Update triggered for user {} (include_demos: {})",
        user_id, params.demo
    )
    .into_response()
}

/// Serve the current snapshot for one user, computing it on demand if absent.
async fn get_resources(
    State(engine): State<RescacheEngine>,
    Path(user_id): Path<u32>,
    Query(params): Query<RefreshParams>,
) -> Response {
    if user_id == 0 {
        return (StatusCode::BAD_REQUEST, "Invalid user ID").into_response();
    }

    match engine.resources.get_resources(user_id, params.demo).await {
        Ok(data) => json_bytes(data),
        Err(e) => error_response(e),
    }
}

async fn health() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], r#"{"status":"ok"}"#)
}

async fn metrics(State(engine): State<RescacheEngine>) -> impl IntoResponse {
    axum::Json(MetricsSnapshot::capture(&engine))
}

// ========================================
// RESPONSE HELPERS
// ========================================

fn json_bytes(data: bytes::Bytes) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], data).into_response()
}

fn error_response(e: ResourceError) -> Response {
    let status = if e.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    tracing::error!("Request failed: {}", e);
    (status, e.to_string()).into_response()
}
