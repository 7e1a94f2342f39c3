pub mod asset_service;
pub mod auth;
pub mod package_service;
pub mod payment_service;
pub mod request_service;
pub mod stats_service;
pub mod team_service;
pub mod user_service;
