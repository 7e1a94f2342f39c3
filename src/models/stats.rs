// src/models/stats.rs

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Os cards do painel do HR
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HrStats {
    pub returnable: i64,
    pub non_returnable: i64,
    pub pending: i64,
    pub approved: i64,
}

// Ranking dos ativos mais solicitados
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopRequestEntry {
    pub asset_name: String,
    pub count: i64,
}
