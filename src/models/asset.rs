// src/models/asset.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::pagination::Pagination;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "asset_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    #[serde(rename = "Returnable")]
    Returnable,
    #[serde(rename = "Non-returnable")]
    NonReturnable,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: Uuid,
    pub product_name: String,
    pub product_type: AssetType,
    pub product_quantity: i32,
    // Sem piso: aprovações repetidas podem deixar negativo
    pub available_quantity: i32,
    pub hr_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetPayload {
    #[validate(length(min = 1, message = "productName is required"))]
    pub product_name: String,
    pub product_type: AssetType,
    #[validate(range(min = 0, message = "productQuantity must not be negative"))]
    pub product_quantity: i32,
    // Se omitido, assume a quantidade total
    pub available_quantity: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetPayload {
    #[validate(length(min = 1, message = "productName must not be empty"))]
    pub product_name: Option<String>,
    pub product_type: Option<AssetType>,
    #[validate(range(min = 0, message = "productQuantity must not be negative"))]
    pub product_quantity: Option<i32>,
    pub available_quantity: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

// GET /api/assets?email=&search=&sort=&page=&limit=
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssetQuery {
    /// E-mail do HR dono dos ativos
    pub email: Option<String>,
    /// Busca por nome do produto (sem diferenciar maiúsculas)
    pub search: Option<String>,
    /// Ordenação pela quantidade: asc | desc
    pub sort: Option<SortOrder>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl AssetQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination { page: self.page, limit: self.limit }
    }
}
