pub mod asset_repo;
pub mod request_repo;
pub mod stats_repo;
pub mod team_repo;
pub mod user_repo;

pub use asset_repo::AssetRepository;
pub use request_repo::RequestRepository;
pub use stats_repo::StatsRepository;
pub use team_repo::TeamRepository;
pub use user_repo::UserRepository;
