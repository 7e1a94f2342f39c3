// src/db/asset_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::asset::{Asset, AssetType, SortOrder},
};

const ASSET_COLUMNS: &str = "id, product_name, product_type, product_quantity, \
                             available_quantity, hr_email, created_at, updated_at";

#[derive(Clone)]
pub struct AssetRepository {
    pool: PgPool,
}

impl AssetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_asset(
        &self,
        product_name: &str,
        product_type: AssetType,
        product_quantity: i32,
        available_quantity: i32,
        hr_email: &str,
    ) -> Result<Asset, AppError> {
        let sql = format!(
            r#"
            INSERT INTO assets (
                product_name, product_type, product_quantity, available_quantity, hr_email
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ASSET_COLUMNS}
            "#
        );
        let asset = sqlx::query_as::<_, Asset>(&sql)
            .bind(product_name)
            .bind(product_type)
            .bind(product_quantity)
            .bind(available_quantity)
            .bind(hr_email)
            .fetch_one(&self.pool)
            .await?;
        Ok(asset)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Asset>, AppError> {
        let sql = format!("SELECT {ASSET_COLUMNS} FROM assets WHERE id = $1");
        let asset = sqlx::query_as::<_, Asset>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(asset)
    }

    /// Lista com filtro por dono, busca no nome, ordenação pela quantidade e paginação.
    /// Sem ordenação explícita, os mais recentes vêm primeiro.
    pub async fn list_assets(
        &self,
        hr_email: Option<&str>,
        search_pattern: Option<&str>,
        sort: Option<SortOrder>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Asset>, AppError> {
        let sql = format!(
            r#"
            SELECT {ASSET_COLUMNS}
            FROM assets
            WHERE ($1::text IS NULL OR hr_email = $1)
              AND ($2::text IS NULL OR product_name ILIKE $2)
            ORDER BY
                CASE WHEN $3::text = 'asc' THEN product_quantity END ASC,
                CASE WHEN $3::text = 'desc' THEN product_quantity END DESC,
                created_at DESC
            LIMIT $4 OFFSET $5
            "#
        );
        let assets = sqlx::query_as::<_, Asset>(&sql)
            .bind(hr_email)
            .bind(search_pattern)
            .bind(sort.map(|s| s.as_str()))
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(assets)
    }

    pub async fn update_asset(
        &self,
        id: Uuid,
        product_name: Option<&str>,
        product_type: Option<AssetType>,
        product_quantity: Option<i32>,
        available_quantity: Option<i32>,
    ) -> Result<Option<Asset>, AppError> {
        let sql = format!(
            r#"
            UPDATE assets
            SET product_name = COALESCE($2, product_name),
                product_type = COALESCE($3, product_type),
                product_quantity = COALESCE($4, product_quantity),
                available_quantity = COALESCE($5, available_quantity),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ASSET_COLUMNS}
            "#
        );
        let asset = sqlx::query_as::<_, Asset>(&sql)
            .bind(id)
            .bind(product_name)
            .bind(product_type)
            .bind(product_quantity)
            .bind(available_quantity)
            .fetch_optional(&self.pool)
            .await?;
        Ok(asset)
    }

    pub async fn delete_asset(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Soma `delta` à quantidade disponível, sem piso e sem teto.
    pub async fn adjust_available_quantity<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        delta: i32,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE assets
            SET available_quantity = available_quantity + $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(delta)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
