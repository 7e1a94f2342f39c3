// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hr,
    #[default]
    Employee,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub role: Role,
    pub subscription: Option<String>,
    pub package_limit: i32,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "invalid email"))]
    pub email: String,
    pub name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub role: Role,
    // Nome do pacote escolhido no cadastro do HR
    pub subscription: Option<String>,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
}

// Resposta do registro. `insertedId` nulo significa que o e-mail já existia.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub inserted_id: Option<Uuid>,
}

impl RegisterResponse {
    pub fn created(id: Uuid) -> Self {
        Self { message: None, inserted_id: Some(id) }
    }

    pub fn already_exists() -> Self {
        Self { message: Some("user already exists".to_string()), inserted_id: None }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

// Troca de pacote após o pagamento
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpgradePayload {
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(range(min = 1, message = "limit must be positive"))]
    pub limit: Option<i32>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type is required"))]
    pub package_type: String,
}
