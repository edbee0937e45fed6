//! HTTP API
//!
//! `POST /api/scrape` runs one audit, `GET /api/health` reports liveness.
//! Failures are rendered as `{ "error": ..., "details"?: ... }`.

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use seolens_core::{AuditError, Auditor, ScrapeResult, iso_timestamp};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auditor: Arc<Auditor>,
}

/// Scrape request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            error: error.into(),
            details,
        }
    }
}

/// Everything the API can answer with instead of a result.
#[derive(Debug)]
pub enum ApiError {
    Audit(AuditError),
    InvalidBody(JsonRejection),
}

impl From<AuditError> for ApiError {
    fn from(err: AuditError) -> Self {
        ApiError::Audit(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Audit(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let body = ErrorResponse::new(err.to_string(), err.details().map(str::to_string));
                (status, Json(body)).into_response()
            }
            ApiError::InvalidBody(rejection) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    format!("Invalid request body: {}", rejection.body_text()),
                    None,
                )),
            )
                .into_response(),
        }
    }
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: iso_timestamp(),
    })
}

/// Scrape endpoint
pub async fn scrape(
    State(state): State<AppState>,
    payload: Result<Json<AuditRequest>, JsonRejection>,
) -> Result<Json<ScrapeResult>, ApiError> {
    let Json(request) = payload?;
    let result = state.auditor.audit(request.url.as_deref()).await?;
    Ok(Json(result))
}

/// Last-resort handler for a panic anywhere below the router.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };
    error!("Scraping error: {}", details);

    ApiError::Audit(AuditError::UnexpectedFailure(details)).into_response()
}

/// Create the API router with all routes
pub fn build_router(state: AppState, cors_enabled: bool) -> Router {
    let api = Router::new()
        .route("/scrape", post(scrape))
        .route("/health", get(health))
        .with_state(state);

    with_middleware(Router::new().nest("/api", api), cors_enabled)
}

/// Wrap `app` in panic recovery, request tracing and, outermost, CORS so
/// every response carries the CORS headers, including panic 500s.
pub fn with_middleware(app: Router, cors_enabled: bool) -> Router {
    let app = app
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http());

    if cors_enabled {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(AnyOrigin)
            .allow_origin(AnyOrigin);
        app.layer(cors)
    } else {
        app
    }
}

pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind HTTP server to {}", config.listen_addr()))
}

/// Serve `app` on `listener` until `shutdown` resolves.
pub async fn run(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!("HTTP API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("HTTP server shutting down");
        })
        .await
        .context("HTTP server error")
}
