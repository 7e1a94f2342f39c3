// src/handlers/team.rs

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        role::{Hr, RequireRole},
    },
    models::{team::Affiliation, DeleteResult},
};

// GET /api/my-team/{key}: a chave é um e-mail
#[utoipa::path(
    get,
    path = "/api/my-team/{key}",
    tag = "Team",
    params(("key" = String, Path, description = "E-mail do HR ou do funcionário")),
    responses(
        (status = 200, description = "Membros da equipe (vazio se não houver vínculo)", body = Vec<Affiliation>)
    ),
    security(("api_jwt" = []))
)]
pub async fn my_team(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(email): Path<String>,
) -> Result<Json<Vec<Affiliation>>, AppError> {
    Ok(Json(app_state.team_service.my_team(&email).await?))
}

// DELETE /api/my-team/{key}: a chave é o ID do vínculo
#[utoipa::path(
    delete,
    path = "/api/my-team/{key}",
    tag = "Team",
    params(("key" = Uuid, Path, description = "ID do vínculo")),
    responses(
        (status = 200, description = "Membro removido", body = DeleteResult),
        (status = 403, description = "A equipe pertence a outro HR"),
        (status = 404, description = "Vínculo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_member(
    State(app_state): State<AppState>,
    guard: RequireRole<Hr>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResult>, AppError> {
    let deleted_count = app_state.team_service.remove_member(&guard.user.email, id).await?;
    Ok(Json(DeleteResult { deleted_count }))
}
