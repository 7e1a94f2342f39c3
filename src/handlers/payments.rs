// src/handlers/payments.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::role::{Hr, RequireRole},
    models::package::{PaymentIntentPayload, PaymentIntentResponse},
};

// POST /api/create-payment-intent
#[utoipa::path(
    post,
    path = "/api/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentPayload,
    responses(
        (status = 200, description = "Client secret da intenção de pagamento", body = PaymentIntentResponse),
        (status = 400, description = "Preço inválido"),
        (status = 502, description = "Falha no provedor de pagamento")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_payment_intent(
    State(app_state): State<AppState>,
    guard: RequireRole<Hr>,
    Json(payload): Json<PaymentIntentPayload>,
) -> Result<Json<PaymentIntentResponse>, AppError> {
    payload.validate()?;

    tracing::info!("Pagamento iniciado por {}", guard.user.email);
    let client_secret = app_state
        .payment_service
        .create_payment_intent(payload.price)
        .await?;

    Ok(Json(PaymentIntentResponse { client_secret }))
}
