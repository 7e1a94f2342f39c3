// src/handlers/users.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::user::{RegisterResponse, RegisterUserPayload, UpdateProfilePayload, UpgradePayload, User},
};

// POST /api/users (público)
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = RegisterResponse),
        (status = 200, description = "E-mail já cadastrado; nada foi alterado", body = RegisterResponse),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = app_state.user_service.register(&payload).await?;
    let status = if response.inserted_id.is_some() { StatusCode::CREATED } else { StatusCode::OK };

    Ok((status, Json(response)))
}

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Todos os usuários", body = Vec<User>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(app_state.user_service.list_users().await?))
}

// GET /api/user/{email}
#[utoipa::path(
    get,
    path = "/api/user/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "E-mail do usuário")),
    responses(
        (status = 200, description = "Usuário", body = User),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(email): Path<String>,
) -> Result<Json<User>, AppError> {
    Ok(Json(app_state.user_service.find_user(&email).await?))
}

// PATCH /api/users/profile/{email}
#[utoipa::path(
    patch,
    path = "/api/users/profile/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "E-mail do usuário")),
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Perfil atualizado", body = User),
        (status = 403, description = "Só o próprio usuário pode alterar o perfil"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(email): Path<String>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;

    let updated = app_state
        .user_service
        .update_profile(&user.email, &email, payload.name.as_deref(), payload.photo_url.as_deref())
        .await?;
    Ok(Json(updated))
}

// PATCH /api/users/upgrade
#[utoipa::path(
    patch,
    path = "/api/users/upgrade",
    tag = "Users",
    request_body = UpgradePayload,
    responses(
        (status = 200, description = "Pacote alterado", body = User),
        (status = 400, description = "Pacote desconhecido ou limite divergente"),
        (status = 403, description = "Só o próprio usuário pode trocar o pacote")
    ),
    security(("api_jwt" = []))
)]
pub async fn upgrade(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpgradePayload>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;

    Ok(Json(app_state.user_service.upgrade(&user.email, &payload).await?))
}
