pub mod asset;
pub mod auth;
pub mod package;
pub mod request;
pub mod stats;
pub mod team;
pub mod user;

// Resultado das exclusões, no formato que o frontend já consome
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted_count: u64,
}
