// src/db/team_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::team::{Affiliation, NewAffiliation},
};

const AFFILIATION_COLUMNS: &str = "id, employee_email, employee_name, hr_email, company_name, \
                                   company_logo, role, created_at";

// Repositório da tabela 'affiliations' (equipes)
#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_hr(&self, hr_email: &str) -> Result<Vec<Affiliation>, AppError> {
        let sql = format!(
            "SELECT {AFFILIATION_COLUMNS} FROM affiliations WHERE hr_email = $1 ORDER BY created_at ASC"
        );
        let members = sqlx::query_as::<_, Affiliation>(&sql)
            .bind(hr_email)
            .fetch_all(&self.pool)
            .await?;
        Ok(members)
    }

    /// Primeiro vínculo do funcionário (o mais antigo).
    pub async fn find_by_employee(&self, employee_email: &str) -> Result<Option<Affiliation>, AppError> {
        let sql = format!(
            r#"
            SELECT {AFFILIATION_COLUMNS}
            FROM affiliations
            WHERE employee_email = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#
        );
        let member = sqlx::query_as::<_, Affiliation>(&sql)
            .bind(employee_email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Affiliation>, AppError> {
        let sql = format!("SELECT {AFFILIATION_COLUMNS} FROM affiliations WHERE id = $1");
        let member = sqlx::query_as::<_, Affiliation>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM affiliations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count_by_hr<'e, E>(&self, executor: E, hr_email: &str) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM affiliations WHERE hr_email = $1")
            .bind(hr_email)
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    pub async fn is_member<'e, E>(
        &self,
        executor: E,
        employee_email: &str,
        hr_email: &str,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM affiliations WHERE employee_email = $1 AND hr_email = $2)",
        )
        .bind(employee_email)
        .bind(hr_email)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    /// Insere o vínculo; se o par funcionário/HR já existir, não faz nada.
    pub async fn insert_affiliation<'e, E>(
        &self,
        executor: E,
        affiliation: &NewAffiliation,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO affiliations (
                employee_email, employee_name, hr_email, company_name, company_logo, role
            )
            VALUES ($1, $2, $3, $4, $5, 'employee')
            ON CONFLICT (employee_email, hr_email) DO NOTHING
            "#,
        )
        .bind(&affiliation.employee_email)
        .bind(&affiliation.employee_name)
        .bind(&affiliation.hr_email)
        .bind(&affiliation.company_name)
        .bind(&affiliation.company_logo)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
