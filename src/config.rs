// src/config.rs

use std::{env, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{AssetRepository, RequestRepository, StatsRepository, TeamRepository, UserRepository},
    services::{
        asset_service::AssetService, auth::AuthService, payment_service::PaymentService,
        request_service::RequestService, stats_service::StatsService, team_service::TeamService,
        user_service::UserService,
    },
};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";

// Configuração lida do ambiente (e do .env, se existir)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub port: u16,
    pub token_ttl_minutes: i64,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("ACCESS_TOKEN_SECRET")?,
            stripe_secret_key: required("STRIPE_SECRET_KEY")?,
            stripe_api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_STRIPE_API_BASE.to_string()),
            port: optional("PORT", DEFAULT_PORT)?,
            token_ttl_minutes: optional("TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?,
            max_connections: optional("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        })
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{key} deve ser definida"))
}

fn optional<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} inválida: '{raw}'")),
        Err(_) => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repo: UserRepository,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub asset_service: AssetService,
    pub request_service: RequestService,
    pub team_service: TeamService,
    pub stats_service: StatsService,
    pub payment_service: PaymentService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Self::from_pool(db_pool, config)
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, config: &Config) -> anyhow::Result<Self> {
        let user_repo = UserRepository::new(db_pool.clone());
        let asset_repo = AssetRepository::new(db_pool.clone());
        let request_repo = RequestRepository::new(db_pool.clone());
        let team_repo = TeamRepository::new(db_pool.clone());
        let stats_repo = StatsRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            config.jwt_secret.clone(),
            chrono::Duration::minutes(config.token_ttl_minutes),
        );
        let request_service = RequestService::new(
            db_pool.clone(),
            user_repo.clone(),
            asset_repo.clone(),
            request_repo,
            team_repo.clone(),
        );
        let payment_service =
            PaymentService::new(config.stripe_api_base.clone(), config.stripe_secret_key.clone())?;

        Ok(Self {
            db_pool,
            user_service: UserService::new(user_repo.clone()),
            asset_service: AssetService::new(asset_repo),
            team_service: TeamService::new(team_repo),
            stats_service: StatsService::new(stats_repo),
            user_repo,
            auth_service,
            request_service,
            payment_service,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_falls_back_to_default_when_unset() {
        let port: u16 = optional("ASSETVERSE_TEST_SURELY_UNSET_PORT", DEFAULT_PORT).unwrap();
        assert_eq!(port, 5000);
    }

    #[test]
    fn required_reports_the_missing_key() {
        let err = required("ASSETVERSE_TEST_SURELY_UNSET_SECRET").unwrap_err();
        assert!(err.to_string().contains("ASSETVERSE_TEST_SURELY_UNSET_SECRET"));
    }
}
