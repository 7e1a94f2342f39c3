// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::issue_token,

        // --- Packages ---
        handlers::packages::list_packages,

        // --- Users ---
        handlers::users::register,
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::update_profile,
        handlers::users::upgrade,

        // --- Assets ---
        handlers::assets::create_asset,
        handlers::assets::list_assets,
        handlers::assets::get_asset,
        handlers::assets::update_asset,
        handlers::assets::delete_asset,

        // --- Requests ---
        handlers::requests::create_request,
        handlers::requests::list_requests,
        handlers::requests::list_all_requests,
        handlers::requests::delete_request,
        handlers::requests::update_status,

        // --- Team ---
        handlers::team::my_team,
        handlers::team::remove_member,

        // --- Stats ---
        handlers::stats::hr_stats,
        handlers::stats::top_requests,

        // --- Payments ---
        handlers::payments::create_payment_intent,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::TokenRequest,
            models::auth::AuthResponse,

            // --- Users ---
            models::user::Role,
            models::user::User,
            models::user::RegisterUserPayload,
            models::user::RegisterResponse,
            models::user::UpdateProfilePayload,
            models::user::UpgradePayload,

            // --- Assets ---
            models::asset::AssetType,
            models::asset::SortOrder,
            models::asset::Asset,
            models::asset::CreateAssetPayload,
            models::asset::UpdateAssetPayload,

            // --- Requests ---
            models::request::RequestStatus,
            models::request::AssetRequest,
            models::request::CreateRequestPayload,
            models::request::UpdateStatusPayload,

            // --- Team / Stats ---
            models::team::Affiliation,
            models::stats::HrStats,
            models::stats::TopRequestEntry,
            models::DeleteResult,

            // --- Packages / Payments ---
            models::package::Package,
            models::package::PaymentIntentPayload,
            models::package::PaymentIntentResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Emissão de tokens"),
        (name = "Packages", description = "Catálogo de planos"),
        (name = "Users", description = "Cadastro e perfil"),
        (name = "Assets", description = "Ativos da empresa"),
        (name = "Requests", description = "Solicitações e fluxo de aprovação"),
        (name = "Team", description = "Equipe do HR"),
        (name = "Stats", description = "Indicadores do painel do HR"),
        (name = "Payments", description = "Pagamento dos planos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
