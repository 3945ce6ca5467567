//! HTTP server implementation for the API

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use seo_core::SeoError;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::handlers;
use super::models::{ApiResponse, InsightsRequest, MetadataRequest};
use crate::config::Config;
use crate::processing::InsightPipeline;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<InsightPipeline>,
}

/// Build the router with all routes and middleware
pub fn router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler))
        .route("/api/metadata", post(metadata_handler))
        .route("/api/insights", post(insights_handler))
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Configure and start the HTTP server
pub async fn start_http_server(pipeline: Arc<InsightPipeline>, config: Arc<Config>) -> Result<()> {
    let address = format!("{}:{}", config.server.host, config.server.port);
    info!("🚀 Starting HTTP server on {}", address);

    let app = router(AppState { pipeline });

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("🌐 API server listening on http://{}", address);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(handlers::health_check().await))
}

/// Metadata lookup handler
async fn metadata_handler(
    State(state): State<AppState>,
    Json(payload): Json<MetadataRequest>,
) -> Response {
    match handlers::get_metadata(&state.pipeline, &payload).await {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::success(data))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Insight generation handler
async fn insights_handler(
    State(state): State<AppState>,
    Json(payload): Json<InsightsRequest>,
) -> Response {
    match handlers::generate_insights(&state.pipeline, &payload).await {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::success(data))).into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(error: &SeoError) -> Response {
    let body: ApiResponse<()> = ApiResponse::error(handlers::message_for(error));
    (handlers::status_for(error), Json(body)).into_response()
}
