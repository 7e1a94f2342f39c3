// src/db/request_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        asset::AssetType,
        request::{AssetRequest, RequestStatus},
    },
};

const REQUEST_COLUMNS: &str = "id, asset_id, asset_name, asset_type, requester_email, \
                               requester_name, hr_email, status, note, request_date, action_date";

pub struct NewRequest<'a> {
    pub asset_id: Uuid,
    pub asset_name: &'a str,
    pub asset_type: AssetType,
    pub requester_email: &'a str,
    pub requester_name: &'a str,
    pub hr_email: &'a str,
    pub note: Option<&'a str>,
}

#[derive(Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_request(&self, new_request: NewRequest<'_>) -> Result<AssetRequest, AppError> {
        let sql = format!(
            r#"
            INSERT INTO requests (
                asset_id, asset_name, asset_type, requester_email, requester_name,
                hr_email, status, note
            )
            VALUES ($1, $2, $3, $4, $5, $6, 'pending', $7)
            RETURNING {REQUEST_COLUMNS}
            "#
        );
        let request = sqlx::query_as::<_, AssetRequest>(&sql)
            .bind(new_request.asset_id)
            .bind(new_request.asset_name)
            .bind(new_request.asset_type)
            .bind(new_request.requester_email)
            .bind(new_request.requester_name)
            .bind(new_request.hr_email)
            .bind(new_request.note)
            .fetch_one(&self.pool)
            .await?;
        Ok(request)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<AssetRequest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM requests WHERE id = $1");
        let request = sqlx::query_as::<_, AssetRequest>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(request)
    }

    /// O filtro por e-mail (HR ou solicitante) e a busca são combinados com AND.
    pub async fn list_requests(
        &self,
        email: Option<&str>,
        search_pattern: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AssetRequest>, AppError> {
        let sql = format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM requests
            WHERE ($1::text IS NULL OR hr_email = $1 OR requester_email = $1)
              AND (
                $2::text IS NULL
                OR requester_name ILIKE $2
                OR requester_email ILIKE $2
                OR asset_name ILIKE $2
              )
            ORDER BY request_date DESC
            LIMIT $3 OFFSET $4
            "#
        );
        let requests = sqlx::query_as::<_, AssetRequest>(&sql)
            .bind(email)
            .bind(search_pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }

    pub async fn list_all(&self) -> Result<Vec<AssetRequest>, AppError> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM requests ORDER BY request_date DESC");
        let requests = sqlx::query_as::<_, AssetRequest>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }

    pub async fn delete_request(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: RequestStatus,
        action_date: DateTime<Utc>,
    ) -> Result<Option<AssetRequest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE requests
            SET status = $2, action_date = $3
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}
            "#
        );
        let request = sqlx::query_as::<_, AssetRequest>(&sql)
            .bind(id)
            .bind(status)
            .bind(action_date)
            .fetch_optional(executor)
            .await?;
        Ok(request)
    }
}
