use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Liveness response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// Database readiness response payload.
#[derive(Serialize)]
pub struct DbHealthResponse {
    /// `ok` or `unavailable`.
    pub status: &'static str,
    /// Whether the database answered `SELECT 1`.
    pub db_healthy: bool,
}

/// GET /health -- process liveness; does not touch the database.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health/db -- 200 when the database is reachable, 503 otherwise.
async fn db_health_check(State(state): State<AppState>) -> (StatusCode, Json<DbHealthResponse>) {
    match reverie_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(DbHealthResponse {
                status: "ok",
                db_healthy: true,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(DbHealthResponse {
                    status: "unavailable",
                    db_healthy: false,
                }),
            )
        }
    }
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/db", get(db_health_check))
}
