//! Health Check Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use shared::error::AppError;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// GET /health - 健康检查 (含数据库连通性)
pub async fn health(State(state): State<ServerState>) -> Result<Json<HealthStatus>, AppError> {
    let database = match state.db.db.query("RETURN 1").await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::error!(error = %e, "Health check: database unreachable");
            "error"
        }
    };

    Ok(Json(HealthStatus {
        status: if database == "ok" { "ok" } else { "degraded" },
        database,
        version: env!("CARGO_PKG_VERSION"),
    }))
}
