// src/models/request.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{common::pagination::Pagination, models::asset::AssetType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Returned,
}

// Uma solicitação de ativo feita por um funcionário
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetRequest {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_name: String,
    pub asset_type: AssetType,
    pub requester_email: String,
    pub requester_name: String,
    pub hr_email: String,
    pub status: RequestStatus,
    pub note: Option<String>,
    pub request_date: DateTime<Utc>,
    pub action_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestPayload {
    pub asset_id: Uuid,
    pub note: Option<String>,
}

// PATCH /api/requests/{id}
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    pub status: RequestStatus,
    // Dados da empresa gravados no vínculo; se ausentes, vêm do cadastro do HR
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
}

// GET /api/requests?email=&search=&page=&limit=
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RequestQuery {
    /// E-mail do HR ou do solicitante
    pub email: Option<String>,
    /// Busca por nome/e-mail do solicitante ou nome do ativo
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl RequestQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination { page: self.page, limit: self.limit }
    }
}
