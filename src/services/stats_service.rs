// src/services/stats_service.rs

use crate::{
    common::error::AppError,
    db::StatsRepository,
    models::stats::{HrStats, TopRequestEntry},
};

#[derive(Clone)]
pub struct StatsService {
    repo: StatsRepository,
}

impl StatsService {
    pub fn new(repo: StatsRepository) -> Self {
        Self { repo }
    }

    pub async fn hr_stats(&self, hr_email: &str) -> Result<HrStats, AppError> {
        self.repo.hr_stats(hr_email).await
    }

    pub async fn top_requests(&self, hr_email: &str) -> Result<Vec<TopRequestEntry>, AppError> {
        self.repo.top_requests(hr_email).await
    }
}
