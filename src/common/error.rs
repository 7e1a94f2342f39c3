use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

// Nosso tipo de erro de domínio, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Requisição inválida: {0}")]
    BadRequest(String),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado: {0}")]
    Forbidden(String),

    // Regra de negócio: equipe do HR já atingiu o limite do pacote
    #[error("Limite do pacote atingido")]
    LimitReached,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Ativo não encontrado")]
    AssetNotFound,

    #[error("Solicitação não encontrada")]
    RequestNotFound,

    #[error("Vínculo de equipe não encontrado")]
    AffiliationNotFound,

    #[error("Falha no provedor de pagamento: {0}")]
    PaymentError(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O formato de erro que vai para o cliente
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), details: None }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: "One or more fields are invalid.".to_string(),
                    details: Some(json!(details)),
                }
            }
            AppError::BadRequest(msg) => ApiError::new(StatusCode::BAD_REQUEST, msg),
            AppError::InvalidToken => ApiError::new(StatusCode::UNAUTHORIZED, "forbidden access"),
            AppError::Forbidden(msg) => ApiError::new(StatusCode::FORBIDDEN, msg),
            AppError::LimitReached => ApiError::new(StatusCode::FORBIDDEN, "limit reached"),
            AppError::UserNotFound => ApiError::new(StatusCode::NOT_FOUND, "user not found"),
            AppError::AssetNotFound => ApiError::new(StatusCode::NOT_FOUND, "asset not found"),
            AppError::RequestNotFound => ApiError::new(StatusCode::NOT_FOUND, "request not found"),
            AppError::AffiliationNotFound => {
                ApiError::new(StatusCode::NOT_FOUND, "team member not found")
            }
            AppError::PaymentError(ref e) => {
                tracing::error!("Falha no provedor de pagamento: {}", e);
                ApiError::new(StatusCode::BAD_GATEWAY, "payment provider unavailable")
            }

            // Todos os outros erros (DatabaseError, InternalServerError, JwtError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "unexpected error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "message": self.message, "details": details }),
            None => json!({ "message": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn limit_reached_is_forbidden() {
        let api = ApiError::from(AppError::LimitReached);
        assert_eq!(api.status, StatusCode::FORBIDDEN);
        assert_eq!(api.message, "limit reached");
    }

    #[test]
    fn invalid_token_is_unauthorized() {
        let api = ApiError::from(AppError::InvalidToken);
        assert_eq!(api.status, StatusCode::UNAUTHORIZED);
        assert_eq!(api.message, "forbidden access");
    }

    #[test]
    fn validation_errors_carry_field_details() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("email");
        err.message = Some("invalid email".into());
        errors.add("email", err);

        let api = ApiError::from(AppError::ValidationError(errors));
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("details");
        assert_eq!(details["email"][0], "invalid email");
    }

    #[test]
    fn database_errors_hide_internals() {
        let api = ApiError::from(AppError::DatabaseError(sqlx::Error::RowNotFound));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "unexpected error");
    }
}
