// src/handlers/assets.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        role::{Hr, RequireRole},
    },
    models::{
        asset::{Asset, AssetQuery, CreateAssetPayload, UpdateAssetPayload},
        DeleteResult,
    },
};

// POST /api/assets
#[utoipa::path(
    post,
    path = "/api/assets",
    tag = "Assets",
    request_body = CreateAssetPayload,
    responses(
        (status = 201, description = "Ativo cadastrado", body = Asset),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Apenas HR")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_asset(
    State(app_state): State<AppState>,
    guard: RequireRole<Hr>,
    Json(payload): Json<CreateAssetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let asset = app_state
        .asset_service
        .create_asset(&guard.user.email, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(asset)))
}

// GET /api/assets
#[utoipa::path(
    get,
    path = "/api/assets",
    tag = "Assets",
    params(AssetQuery),
    responses(
        (status = 200, description = "Página de ativos", body = Vec<Asset>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_assets(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<AssetQuery>,
) -> Result<Json<Vec<Asset>>, AppError> {
    Ok(Json(app_state.asset_service.list_assets(&query).await?))
}

// GET /api/assets/{id}
#[utoipa::path(
    get,
    path = "/api/assets/{id}",
    tag = "Assets",
    params(("id" = Uuid, Path, description = "ID do ativo")),
    responses(
        (status = 200, description = "Ativo", body = Asset),
        (status = 404, description = "Ativo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_asset(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Asset>, AppError> {
    Ok(Json(app_state.asset_service.get_asset(id).await?))
}

// PATCH /api/assets/{id}
#[utoipa::path(
    patch,
    path = "/api/assets/{id}",
    tag = "Assets",
    params(("id" = Uuid, Path, description = "ID do ativo")),
    request_body = UpdateAssetPayload,
    responses(
        (status = 200, description = "Ativo atualizado", body = Asset),
        (status = 403, description = "O ativo pertence a outro HR"),
        (status = 404, description = "Ativo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_asset(
    State(app_state): State<AppState>,
    guard: RequireRole<Hr>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAssetPayload>,
) -> Result<Json<Asset>, AppError> {
    payload.validate()?;

    let asset = app_state
        .asset_service
        .update_asset(&guard.user.email, id, &payload)
        .await?;
    Ok(Json(asset))
}

// DELETE /api/assets/{id}
#[utoipa::path(
    delete,
    path = "/api/assets/{id}",
    tag = "Assets",
    params(("id" = Uuid, Path, description = "ID do ativo")),
    responses(
        (status = 200, description = "Ativo removido", body = DeleteResult),
        (status = 403, description = "O ativo pertence a outro HR"),
        (status = 404, description = "Ativo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_asset(
    State(app_state): State<AppState>,
    guard: RequireRole<Hr>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResult>, AppError> {
    let deleted_count = app_state.asset_service.delete_asset(&guard.user.email, id).await?;
    Ok(Json(DeleteResult { deleted_count }))
}
