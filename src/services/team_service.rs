// src/services/team_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::TeamRepository,
    models::team::Affiliation,
};

#[derive(Clone)]
pub struct TeamService {
    team_repo: TeamRepository,
}

impl TeamService {
    pub fn new(team_repo: TeamRepository) -> Self {
        Self { team_repo }
    }

    /// A equipe vista por um e-mail: a do próprio HR, ou a do HR ao qual o
    /// funcionário pertence, ou vazia.
    pub async fn my_team(&self, email: &str) -> Result<Vec<Affiliation>, AppError> {
        let as_hr = self.team_repo.list_by_hr(email).await?;
        if !as_hr.is_empty() {
            return Ok(as_hr);
        }

        match self.team_repo.find_by_employee(email).await? {
            Some(membership) => self.team_repo.list_by_hr(&membership.hr_email).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn remove_member(&self, caller_email: &str, id: Uuid) -> Result<u64, AppError> {
        let membership = self
            .team_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::AffiliationNotFound)?;

        if membership.hr_email != caller_email {
            return Err(AppError::Forbidden("Forbidden: You do not own this team.".to_string()));
        }

        let deleted = self.team_repo.delete_by_id(id).await?;
        tracing::info!("{} removido da equipe de {}", membership.employee_email, caller_email);
        Ok(deleted)
    }
}
