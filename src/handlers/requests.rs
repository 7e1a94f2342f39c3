// src/handlers/requests.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        request::{AssetRequest, CreateRequestPayload, RequestQuery, UpdateStatusPayload},
        DeleteResult,
    },
};

// POST /api/requests
#[utoipa::path(
    post,
    path = "/api/requests",
    tag = "Requests",
    request_body = CreateRequestPayload,
    responses(
        (status = 201, description = "Solicitação criada (pendente)", body = AssetRequest),
        (status = 404, description = "Ativo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_request(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    let request = app_state
        .request_service
        .create_request(&user.email, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(request)))
}

// GET /api/requests
#[utoipa::path(
    get,
    path = "/api/requests",
    tag = "Requests",
    params(RequestQuery),
    responses(
        (status = 200, description = "Página de solicitações", body = Vec<AssetRequest>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_requests(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<RequestQuery>,
) -> Result<Json<Vec<AssetRequest>>, AppError> {
    Ok(Json(app_state.request_service.list_requests(&query).await?))
}

// GET /api/all-requests
#[utoipa::path(
    get,
    path = "/api/all-requests",
    tag = "Requests",
    responses(
        (status = 200, description = "Todas as solicitações", body = Vec<AssetRequest>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_all_requests(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<AssetRequest>>, AppError> {
    Ok(Json(app_state.request_service.list_all_requests().await?))
}

// DELETE /api/requests/{id}
#[utoipa::path(
    delete,
    path = "/api/requests/{id}",
    tag = "Requests",
    params(("id" = Uuid, Path, description = "ID da solicitação")),
    responses(
        (status = 200, description = "Solicitação removida", body = DeleteResult),
        (status = 403, description = "Nem solicitante nem HR dono"),
        (status = 404, description = "Solicitação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_request(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResult>, AppError> {
    let deleted_count = app_state.request_service.delete_request(&user.email, id).await?;
    Ok(Json(DeleteResult { deleted_count }))
}

// PATCH /api/requests/{id}: aprovar, recusar ou devolver
#[utoipa::path(
    patch,
    path = "/api/requests/{id}",
    tag = "Requests",
    params(("id" = Uuid, Path, description = "ID da solicitação")),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status alterado", body = AssetRequest),
        (status = 403, description = "Sem permissão, ou limite do pacote atingido ('limit reached')"),
        (status = 404, description = "Solicitação ou HR não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<Json<AssetRequest>, AppError> {
    let updated = app_state
        .request_service
        .update_status(&user.email, id, &payload)
        .await?;
    Ok(Json(updated))
}
