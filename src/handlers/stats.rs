// src/handlers/stats.rs

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::role::{Hr, RequireRole},
    models::stats::{HrStats, TopRequestEntry},
};

// O HR só enxerga os próprios números
fn ensure_same_hr(guard: &RequireRole<Hr>, email: &str) -> Result<(), AppError> {
    if guard.user.email != email {
        return Err(AppError::Forbidden("Forbidden: stats belong to another HR.".to_string()));
    }
    Ok(())
}

// GET /api/hr-stats/{email}
#[utoipa::path(
    get,
    path = "/api/hr-stats/{email}",
    tag = "Stats",
    params(("email" = String, Path, description = "E-mail do HR")),
    responses(
        (status = 200, description = "Contadores do painel do HR", body = HrStats),
        (status = 403, description = "Apenas o próprio HR")
    ),
    security(("api_jwt" = []))
)]
pub async fn hr_stats(
    State(app_state): State<AppState>,
    guard: RequireRole<Hr>,
    Path(email): Path<String>,
) -> Result<Json<HrStats>, AppError> {
    ensure_same_hr(&guard, &email)?;
    Ok(Json(app_state.stats_service.hr_stats(&email).await?))
}

// GET /api/top-requests/{email}
#[utoipa::path(
    get,
    path = "/api/top-requests/{email}",
    tag = "Stats",
    params(("email" = String, Path, description = "E-mail do HR")),
    responses(
        (status = 200, description = "Os cinco ativos mais solicitados", body = Vec<TopRequestEntry>),
        (status = 403, description = "Apenas o próprio HR")
    ),
    security(("api_jwt" = []))
)]
pub async fn top_requests(
    State(app_state): State<AppState>,
    guard: RequireRole<Hr>,
    Path(email): Path<String>,
) -> Result<Json<Vec<TopRequestEntry>>, AppError> {
    ensure_same_hr(&guard, &email)?;
    Ok(Json(app_state.stats_service.top_requests(&email).await?))
}
