// src/handlers/packages.rs

use axum::Json;

use crate::{models::package::Package, services::package_service};

// GET /api/packages
#[utoipa::path(
    get,
    path = "/api/packages",
    tag = "Packages",
    responses(
        (status = 200, description = "Catálogo fixo de planos", body = Vec<Package>)
    )
)]
pub async fn list_packages() -> Json<Vec<Package>> {
    Json(package_service::catalog())
}
