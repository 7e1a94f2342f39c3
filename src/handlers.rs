pub mod assets;
pub mod auth;
pub mod packages;
pub mod payments;
pub mod requests;
pub mod stats;
pub mod team;
pub mod users;
