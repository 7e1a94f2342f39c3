// src/models/team.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::user::Role;

// Vínculo de um funcionário com o HR/empresa
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Affiliation {
    pub id: Uuid,
    pub employee_email: String,
    pub employee_name: String,
    pub hr_email: String,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAffiliation {
    pub employee_email: String,
    pub employee_name: String,
    pub hr_email: String,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
}
