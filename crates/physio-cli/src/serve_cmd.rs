use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use physio_core::plan::{ExercisePlan, PlanRequest, PlanService, PlanSource};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

pub const SUCCESS_MESSAGE: &str = "Exercise plan generated successfully";
pub const FALLBACK_MESSAGE: &str = "Returned the default exercise plan";

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub plan: ExercisePlan,
    pub source: PlanSource,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(service: PlanService) -> Router {
    Router::new()
        .route("/api/recommendations/exercise", post(recommend_exercise))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(service: PlanService, bind: &str, port: u16) -> Result<()> {
    let app = build_router(service);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("physio serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("physio serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn recommend_exercise(
    State(service): State<PlanService>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let Json(mut request) = payload?;
    request.targeted_areas.retain(|area| !area.trim().is_empty());
    if request.targeted_areas.is_empty() {
        return Err(AppError::bad_request(
            "targetedAreas must contain at least one area",
        ));
    }

    let outcome = service.generate(&request).await;
    let message = match &outcome.source {
        PlanSource::Generated => SUCCESS_MESSAGE.to_string(),
        PlanSource::Fallback(reason) => format!("{FALLBACK_MESSAGE} ({reason})"),
    };
    Ok(Json(RecommendationResponse {
        success: true,
        plan: outcome.plan,
        source: outcome.source,
        message,
    }))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
