// src/services/asset_service.rs

use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::search_pattern},
    db::AssetRepository,
    models::asset::{Asset, AssetQuery, CreateAssetPayload, UpdateAssetPayload},
};

#[derive(Clone)]
pub struct AssetService {
    asset_repo: AssetRepository,
}

impl AssetService {
    pub fn new(asset_repo: AssetRepository) -> Self {
        Self { asset_repo }
    }

    pub async fn create_asset(&self, hr_email: &str, payload: &CreateAssetPayload) -> Result<Asset, AppError> {
        let available = payload.available_quantity.unwrap_or(payload.product_quantity);
        let asset = self
            .asset_repo
            .create_asset(
                payload.product_name.trim(),
                payload.product_type,
                payload.product_quantity,
                available,
                hr_email,
            )
            .await?;

        tracing::info!("Ativo '{}' cadastrado por {}", asset.product_name, hr_email);
        Ok(asset)
    }

    pub async fn list_assets(&self, query: &AssetQuery) -> Result<Vec<Asset>, AppError> {
        let pagination = query.pagination();
        let pattern = search_pattern(query.search.as_deref());
        self.asset_repo
            .list_assets(
                query.email.as_deref().filter(|e| !e.is_empty()),
                pattern.as_deref(),
                query.sort,
                pagination.limit(),
                pagination.offset(),
            )
            .await
    }

    pub async fn get_asset(&self, id: Uuid) -> Result<Asset, AppError> {
        self.asset_repo.find_by_id(id).await?.ok_or(AppError::AssetNotFound)
    }

    pub async fn update_asset(
        &self,
        caller_email: &str,
        id: Uuid,
        payload: &UpdateAssetPayload,
    ) -> Result<Asset, AppError> {
        let asset = self.get_asset(id).await?;
        ensure_owner(caller_email, &asset)?;

        self.asset_repo
            .update_asset(
                id,
                payload.product_name.as_deref().map(str::trim),
                payload.product_type,
                payload.product_quantity,
                payload.available_quantity,
            )
            .await?
            .ok_or(AppError::AssetNotFound)
    }

    pub async fn delete_asset(&self, caller_email: &str, id: Uuid) -> Result<u64, AppError> {
        let asset = self.get_asset(id).await?;
        ensure_owner(caller_email, &asset)?;

        let deleted = self.asset_repo.delete_asset(id).await?;
        tracing::info!("Ativo {} removido por {}", id, caller_email);
        Ok(deleted)
    }
}

fn ensure_owner(caller_email: &str, asset: &Asset) -> Result<(), AppError> {
    if asset.hr_email != caller_email {
        return Err(AppError::Forbidden("Forbidden: You do not own this asset.".to_string()));
    }
    Ok(())
}
