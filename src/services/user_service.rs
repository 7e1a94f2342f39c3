// src/services/user_service.rs

use crate::{
    common::error::AppError,
    db::{user_repo::NewUser, UserRepository},
    models::user::{RegisterResponse, RegisterUserPayload, UpgradePayload, User},
    services::package_service,
};

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
}

impl UserService {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Cadastro idempotente: se o e-mail já existir, nada é alterado.
    pub async fn register(&self, payload: &RegisterUserPayload) -> Result<RegisterResponse, AppError> {
        let package_limit = payload
            .subscription
            .as_deref()
            .and_then(package_service::find_package)
            .map(|p| p.employee_limit)
            .unwrap_or(0);

        let created = self
            .user_repo
            .create_user(NewUser {
                email: &payload.email,
                name: payload.name.as_deref(),
                photo_url: payload.photo_url.as_deref(),
                role: payload.role,
                subscription: payload.subscription.as_deref(),
                package_limit,
                company_name: payload.company_name.as_deref(),
                company_logo: payload.company_logo.as_deref(),
            })
            .await?;

        Ok(match created {
            Some(user) => {
                tracing::info!("Novo usuário registrado: {} ({:?})", user.email, user.role);
                RegisterResponse::created(user.id)
            }
            None => RegisterResponse::already_exists(),
        })
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list_all().await
    }

    pub async fn find_user(&self, email: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn update_profile(
        &self,
        caller_email: &str,
        email: &str,
        name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<User, AppError> {
        ensure_self(caller_email, email)?;
        self.user_repo
            .update_profile(email, name, photo_url)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    /// Troca de pacote. O limite vem sempre do catálogo.
    pub async fn upgrade(&self, caller_email: &str, payload: &UpgradePayload) -> Result<User, AppError> {
        ensure_self(caller_email, &payload.email)?;
        let package = resolve_upgrade(payload)?;

        let user = self
            .user_repo
            .update_package(&payload.email, &package.name, package.employee_limit)
            .await?
            .ok_or(AppError::UserNotFound)?;

        tracing::info!(
            "Pacote de {} alterado para {} (limite {})",
            user.email,
            package.name,
            package.employee_limit
        );
        Ok(user)
    }
}

fn ensure_self(caller_email: &str, email: &str) -> Result<(), AppError> {
    if caller_email != email {
        return Err(AppError::Forbidden("Forbidden: you can only change your own account.".to_string()));
    }
    Ok(())
}

fn resolve_upgrade(payload: &UpgradePayload) -> Result<crate::models::package::Package, AppError> {
    let package = package_service::find_package(&payload.package_type)
        .ok_or_else(|| AppError::BadRequest(format!("unknown package '{}'", payload.package_type)))?;

    if let Some(limit) = payload.limit {
        if limit != package.employee_limit {
            return Err(AppError::BadRequest(format!(
                "limit {} does not match package '{}' ({})",
                limit, package.name, package.employee_limit
            )));
        }
    }
    Ok(package)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upgrade(limit: Option<i32>, kind: &str) -> UpgradePayload {
        UpgradePayload {
            email: "hr@acme.io".to_string(),
            limit,
            package_type: kind.to_string(),
        }
    }

    #[test]
    fn upgrade_takes_limit_from_catalog() {
        let package = resolve_upgrade(&upgrade(None, "premium")).unwrap();
        assert_eq!(package.name, "Premium");
        assert_eq!(package.employee_limit, 20);
        assert!(resolve_upgrade(&upgrade(Some(10), "Standard")).is_ok());
    }

    #[test]
    fn upgrade_rejects_mismatched_limit_and_unknown_tier() {
        assert!(matches!(resolve_upgrade(&upgrade(Some(50), "Basic")), Err(AppError::BadRequest(_))));
        assert!(matches!(resolve_upgrade(&upgrade(None, "Gold")), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn only_the_account_owner_may_change_it() {
        assert!(ensure_self("hr@acme.io", "hr@acme.io").is_ok());
        // E-mails são comparados exatamente, como a coluna users.email
        assert!(matches!(ensure_self("hr@acme.io", "HR@acme.io"), Err(AppError::Forbidden(_))));
        assert!(matches!(ensure_self("other@acme.io", "hr@acme.io"), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn duplicate_registration_returns_already_exists_marker() {
        let json = serde_json::to_value(RegisterResponse::already_exists()).unwrap();
        assert_eq!(json["message"], "user already exists");
        assert!(json["insertedId"].is_null());

        let id = uuid::Uuid::new_v4();
        let json = serde_json::to_value(RegisterResponse::created(id)).unwrap();
        assert!(json.get("message").is_none());
        assert_eq!(json["insertedId"], id.to_string());
    }
}
