// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::user::{Role, User},
};

const USER_COLUMNS: &str = "id, email, name, photo_url, role, subscription, package_limit, \
                            company_name, company_logo, created_at, updated_at";

// Campos de um novo cadastro
pub struct NewUser<'a> {
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub photo_url: Option<&'a str>,
    pub role: Role,
    pub subscription: Option<&'a str>,
    pub package_limit: i32,
    pub company_name: Option<&'a str>,
    pub company_logo: Option<&'a str>,
}

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Busca o usuário e trava a linha até o fim da transação.
    /// Serializa aprovações concorrentes para o mesmo HR.
    pub async fn find_by_email_for_update<'e, E>(
        &self,
        executor: E,
        email: &str,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1 FOR UPDATE");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(executor)
            .await?;
        Ok(user)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC");
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(users)
    }

    /// Cria o usuário. Retorna `None` se o e-mail já existir (não altera nada).
    pub async fn create_user(&self, new_user: NewUser<'_>) -> Result<Option<User>, AppError> {
        let sql = format!(
            r#"
            INSERT INTO users (
                email, name, photo_url, role, subscription, package_limit,
                company_name, company_logo
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (email) DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(new_user.email)
            .bind(new_user.name)
            .bind(new_user.photo_url)
            .bind(new_user.role)
            .bind(new_user.subscription)
            .bind(new_user.package_limit)
            .bind(new_user.company_name)
            .bind(new_user.company_logo)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn update_profile(
        &self,
        email: &str,
        name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        let sql = format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                photo_url = COALESCE($3, photo_url),
                updated_at = NOW()
            WHERE email = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(name)
            .bind(photo_url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn update_package(
        &self,
        email: &str,
        subscription: &str,
        package_limit: i32,
    ) -> Result<Option<User>, AppError> {
        let sql = format!(
            r#"
            UPDATE users
            SET subscription = $2, package_limit = $3, updated_at = NOW()
            WHERE email = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(subscription)
            .bind(package_limit)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Preenche os dados da empresa do funcionário na primeira aprovação.
    pub async fn set_company<'e, E>(
        &self,
        executor: E,
        email: &str,
        company_name: Option<&str>,
        company_logo: Option<&str>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET company_name = $2, company_logo = $3, updated_at = NOW()
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(company_name)
        .bind(company_logo)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
