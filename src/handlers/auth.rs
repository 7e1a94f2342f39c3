// src/handlers/auth.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{AuthResponse, TokenRequest},
};

// Handler de emissão de token
#[utoipa::path(
    post,
    path = "/api/jwt",
    tag = "Auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token assinado", body = AuthResponse),
        (status = 400, description = "E-mail inválido")
    )
)]
pub async fn issue_token(
    State(app_state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let token = app_state.auth_service.issue_token(&payload.email)?;
    Ok(Json(AuthResponse { token }))
}
