// src/middleware/role.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::user::{Role, User},
};

/// 1. O Trait que define um papel exigido
pub trait RoleDef: Send + Sync + 'static {
    fn role() -> Role;
}

/// 2. O Extractor (Guardião). Carrega o cadastro do chamador.
pub struct RequireRole<T> {
    pub user: User,
    _role: PhantomData<T>,
}

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // A. Extrai o chamador (posto pelo auth_guard)
        let caller = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or(AppError::InvalidToken)?;

        // B. Busca o cadastro no banco
        let user = app_state
            .user_repo
            .find_by_email(&caller.email)
            .await?
            .ok_or_else(|| AppError::Forbidden("Forbidden: unknown user.".to_string()))?;

        // C. Confere o papel
        if user.role != T::role() {
            return Err(AppError::Forbidden(format!(
                "Forbidden: this action requires the '{}' role.",
                role_name(T::role())
            )));
        }

        Ok(RequireRole { user, _role: PhantomData })
    }
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::Hr => "hr",
        Role::Employee => "employee",
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct Hr;
impl RoleDef for Hr {
    fn role() -> Role { Role::Hr }
}
