// src/services/request_service.rs

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::search_pattern},
    db::{request_repo::NewRequest, AssetRepository, RequestRepository, TeamRepository, UserRepository},
    models::{
        request::{AssetRequest, CreateRequestPayload, RequestQuery, RequestStatus, UpdateStatusPayload},
        team::NewAffiliation,
        user::User,
    },
};

// ---
// Regras puras do fluxo de aprovação
// ---

/// Quem pode mudar o status: o HR dono (qualquer status) ou o próprio
/// solicitante, que só pode devolver.
pub fn authorize_transition(
    caller_email: &str,
    request: &AssetRequest,
    target: RequestStatus,
) -> Result<(), AppError> {
    if request.hr_email == caller_email {
        return Ok(());
    }
    if request.requester_email == caller_email {
        if target == RequestStatus::Returned {
            return Ok(());
        }
        return Err(AppError::Forbidden(
            "Forbidden: employees can only return assets.".to_string(),
        ));
    }
    Err(AppError::Forbidden("Forbidden: You do not own this request.".to_string()))
}

/// Membros existentes passam sempre; novos só entram abaixo do limite.
pub fn check_team_limit(is_member: bool, team_size: i64, package_limit: i32) -> Result<(), AppError> {
    if !is_member && team_size >= i64::from(package_limit) {
        return Err(AppError::LimitReached);
    }
    Ok(())
}

// ---
// Store do fluxo de aprovação
// ---

/// Operações que o fluxo de aprovação precisa do banco.
/// A implementação de produção roda tudo dentro de uma transação.
#[async_trait]
pub trait ApprovalStore: Send {
    async fn find_request(&mut self, id: Uuid) -> Result<Option<AssetRequest>, AppError>;

    /// Carrega o HR e segura a linha até o commit.
    async fn lock_hr(&mut self, hr_email: &str) -> Result<Option<User>, AppError>;

    async fn team_size(&mut self, hr_email: &str) -> Result<i64, AppError>;

    async fn is_member(&mut self, employee_email: &str, hr_email: &str) -> Result<bool, AppError>;

    async fn set_status(&mut self, id: Uuid, status: RequestStatus) -> Result<Option<AssetRequest>, AppError>;

    async fn adjust_available_quantity(&mut self, asset_id: Uuid, delta: i32) -> Result<(), AppError>;

    async fn add_affiliation(&mut self, affiliation: &NewAffiliation) -> Result<(), AppError>;

    async fn set_company(
        &mut self,
        email: &str,
        company_name: Option<&str>,
        company_logo: Option<&str>,
    ) -> Result<(), AppError>;
}

/// Executa uma mudança de status sobre qualquer store.
pub async fn apply_status_change<S: ApprovalStore + ?Sized>(
    store: &mut S,
    caller_email: &str,
    request_id: Uuid,
    change: &UpdateStatusPayload,
) -> Result<AssetRequest, AppError> {
    let request = store
        .find_request(request_id)
        .await?
        .ok_or(AppError::RequestNotFound)?;

    authorize_transition(caller_email, &request, change.status)?;

    // Checagem de limite antes de qualquer escrita
    let mut approval = None;
    if change.status == RequestStatus::Approved {
        let hr = store
            .lock_hr(&request.hr_email)
            .await?
            .ok_or(AppError::UserNotFound)?;
        let is_member = store.is_member(&request.requester_email, &request.hr_email).await?;
        let team_size = store.team_size(&request.hr_email).await?;

        if let Err(e) = check_team_limit(is_member, team_size, hr.package_limit) {
            tracing::warn!(
                "Limite do pacote atingido para {} ({}/{})",
                hr.email,
                team_size,
                hr.package_limit
            );
            return Err(e);
        }
        approval = Some((hr, is_member));
    }

    let updated = store
        .set_status(request_id, change.status)
        .await?
        .ok_or(AppError::RequestNotFound)?;

    match change.status {
        RequestStatus::Approved => {
            store.adjust_available_quantity(request.asset_id, -1).await?;

            if let Some((hr, false)) = approval {
                let affiliation = NewAffiliation {
                    employee_email: request.requester_email.clone(),
                    employee_name: request.requester_name.clone(),
                    hr_email: request.hr_email.clone(),
                    company_name: change.company_name.clone().or(hr.company_name),
                    company_logo: change.company_logo.clone().or(hr.company_logo),
                };
                store.add_affiliation(&affiliation).await?;
                store
                    .set_company(
                        &affiliation.employee_email,
                        affiliation.company_name.as_deref(),
                        affiliation.company_logo.as_deref(),
                    )
                    .await?;
                tracing::info!(
                    "{} entrou na equipe de {}",
                    affiliation.employee_email,
                    affiliation.hr_email
                );
            }
        }
        RequestStatus::Returned => {
            store.adjust_available_quantity(request.asset_id, 1).await?;
        }
        RequestStatus::Pending | RequestStatus::Rejected => {}
    }

    tracing::info!("Solicitação {} agora está {:?}", request_id, updated.status);
    Ok(updated)
}

/// Store de produção: repositórios sobre uma única transação.
pub struct PgApprovalStore {
    tx: Transaction<'static, Postgres>,
    user_repo: UserRepository,
    asset_repo: AssetRepository,
    request_repo: RequestRepository,
    team_repo: TeamRepository,
}

impl PgApprovalStore {
    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl ApprovalStore for PgApprovalStore {
    async fn find_request(&mut self, id: Uuid) -> Result<Option<AssetRequest>, AppError> {
        self.request_repo.find_by_id(&mut *self.tx, id).await
    }

    async fn lock_hr(&mut self, hr_email: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_email_for_update(&mut *self.tx, hr_email).await
    }

    async fn team_size(&mut self, hr_email: &str) -> Result<i64, AppError> {
        self.team_repo.count_by_hr(&mut *self.tx, hr_email).await
    }

    async fn is_member(&mut self, employee_email: &str, hr_email: &str) -> Result<bool, AppError> {
        self.team_repo.is_member(&mut *self.tx, employee_email, hr_email).await
    }

    async fn set_status(&mut self, id: Uuid, status: RequestStatus) -> Result<Option<AssetRequest>, AppError> {
        self.request_repo.set_status(&mut *self.tx, id, status, Utc::now()).await
    }

    async fn adjust_available_quantity(&mut self, asset_id: Uuid, delta: i32) -> Result<(), AppError> {
        let touched = self
            .asset_repo
            .adjust_available_quantity(&mut *self.tx, asset_id, delta)
            .await?;
        if touched == 0 {
            // O ativo pode ter sido removido; a solicitação segue valendo.
            tracing::warn!("Ativo {} não encontrado ao ajustar disponibilidade", asset_id);
        }
        Ok(())
    }

    async fn add_affiliation(&mut self, affiliation: &NewAffiliation) -> Result<(), AppError> {
        self.team_repo.insert_affiliation(&mut *self.tx, affiliation).await?;
        Ok(())
    }

    async fn set_company(
        &mut self,
        email: &str,
        company_name: Option<&str>,
        company_logo: Option<&str>,
    ) -> Result<(), AppError> {
        self.user_repo
            .set_company(&mut *self.tx, email, company_name, company_logo)
            .await?;
        Ok(())
    }
}

// ---
// Serviço
// ---

#[derive(Clone)]
pub struct RequestService {
    pool: PgPool,
    user_repo: UserRepository,
    asset_repo: AssetRepository,
    request_repo: RequestRepository,
    team_repo: TeamRepository,
}

impl RequestService {
    pub fn new(
        pool: PgPool,
        user_repo: UserRepository,
        asset_repo: AssetRepository,
        request_repo: RequestRepository,
        team_repo: TeamRepository,
    ) -> Self {
        Self { pool, user_repo, asset_repo, request_repo, team_repo }
    }

    pub async fn create_request(
        &self,
        requester_email: &str,
        payload: &CreateRequestPayload,
    ) -> Result<AssetRequest, AppError> {
        let asset = self
            .asset_repo
            .find_by_id(payload.asset_id)
            .await?
            .ok_or(AppError::AssetNotFound)?;

        let requester_name = self
            .user_repo
            .find_by_email(requester_email)
            .await?
            .and_then(|u| u.name)
            .unwrap_or_else(|| requester_email.to_string());

        let request = self
            .request_repo
            .create_request(NewRequest {
                asset_id: asset.id,
                asset_name: &asset.product_name,
                asset_type: asset.product_type,
                requester_email,
                requester_name: &requester_name,
                hr_email: &asset.hr_email,
                note: payload.note.as_deref(),
            })
            .await?;

        tracing::info!("{} solicitou '{}'", requester_email, asset.product_name);
        Ok(request)
    }

    pub async fn list_requests(&self, query: &RequestQuery) -> Result<Vec<AssetRequest>, AppError> {
        let pagination = query.pagination();
        let pattern = search_pattern(query.search.as_deref());
        self.request_repo
            .list_requests(
                query.email.as_deref().filter(|e| !e.is_empty()),
                pattern.as_deref(),
                pagination.limit(),
                pagination.offset(),
            )
            .await
    }

    pub async fn list_all_requests(&self) -> Result<Vec<AssetRequest>, AppError> {
        self.request_repo.list_all().await
    }

    pub async fn delete_request(&self, caller_email: &str, id: Uuid) -> Result<u64, AppError> {
        let request = self
            .request_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::RequestNotFound)?;

        if request.hr_email != caller_email && request.requester_email != caller_email {
            return Err(AppError::Forbidden("Forbidden: You do not own this request.".to_string()));
        }

        self.request_repo.delete_request(id).await
    }

    /// Fluxo de aprovação completo, atômico.
    /// Se qualquer passo falhar, o drop da transação faz o rollback.
    pub async fn update_status(
        &self,
        caller_email: &str,
        request_id: Uuid,
        change: &UpdateStatusPayload,
    ) -> Result<AssetRequest, AppError> {
        let tx = self.pool.begin().await?;
        let mut store = PgApprovalStore {
            tx,
            user_repo: self.user_repo.clone(),
            asset_repo: self.asset_repo.clone(),
            request_repo: self.request_repo.clone(),
            team_repo: self.team_repo.clone(),
        };

        let updated = apply_status_change(&mut store, caller_email, request_id, change).await?;
        store.commit().await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{asset::AssetType, user::Role};
    use std::collections::HashMap;

    const HR: &str = "hr@acme.io";
    const EMPLOYEE: &str = "ana@acme.io";

    // Store em memória para exercitar o fluxo sem banco
    #[derive(Default)]
    struct MemoryStore {
        requests: HashMap<Uuid, AssetRequest>,
        users: HashMap<String, User>,
        available: HashMap<Uuid, i32>,
        team: Vec<NewAffiliation>,
    }

    #[async_trait]
    impl ApprovalStore for MemoryStore {
        async fn find_request(&mut self, id: Uuid) -> Result<Option<AssetRequest>, AppError> {
            Ok(self.requests.get(&id).cloned())
        }

        async fn lock_hr(&mut self, hr_email: &str) -> Result<Option<User>, AppError> {
            Ok(self.users.get(hr_email).cloned())
        }

        async fn team_size(&mut self, hr_email: &str) -> Result<i64, AppError> {
            Ok(self.team.iter().filter(|a| a.hr_email == hr_email).count() as i64)
        }

        async fn is_member(&mut self, employee_email: &str, hr_email: &str) -> Result<bool, AppError> {
            Ok(self
                .team
                .iter()
                .any(|a| a.employee_email == employee_email && a.hr_email == hr_email))
        }

        async fn set_status(&mut self, id: Uuid, status: RequestStatus) -> Result<Option<AssetRequest>, AppError> {
            Ok(self.requests.get_mut(&id).map(|r| {
                r.status = status;
                r.action_date = Some(Utc::now());
                r.clone()
            }))
        }

        async fn adjust_available_quantity(&mut self, asset_id: Uuid, delta: i32) -> Result<(), AppError> {
            *self.available.entry(asset_id).or_insert(0) += delta;
            Ok(())
        }

        async fn add_affiliation(&mut self, affiliation: &NewAffiliation) -> Result<(), AppError> {
            self.team.push(affiliation.clone());
            Ok(())
        }

        async fn set_company(
            &mut self,
            email: &str,
            company_name: Option<&str>,
            company_logo: Option<&str>,
        ) -> Result<(), AppError> {
            if let Some(user) = self.users.get_mut(email) {
                user.company_name = company_name.map(str::to_string);
                user.company_logo = company_logo.map(str::to_string);
            }
            Ok(())
        }
    }

    fn user(email: &str, role: Role, package_limit: i32) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: None,
            photo_url: None,
            role,
            subscription: None,
            package_limit,
            company_name: (role == Role::Hr).then(|| "Acme".to_string()),
            company_logo: (role == Role::Hr).then(|| "https://acme.io/logo.png".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn member(email: &str) -> NewAffiliation {
        NewAffiliation {
            employee_email: email.to_string(),
            employee_name: email.to_string(),
            hr_email: HR.to_string(),
            company_name: None,
            company_logo: None,
        }
    }

    /// HR com `limit`, `team` membros já na equipe, um ativo com 5 unidades
    /// e uma solicitação pendente de EMPLOYEE.
    fn setup(limit: i32, team: usize) -> (MemoryStore, Uuid, Uuid) {
        let mut store = MemoryStore::default();
        store.users.insert(HR.to_string(), user(HR, Role::Hr, limit));
        store.users.insert(EMPLOYEE.to_string(), user(EMPLOYEE, Role::Employee, 0));
        for i in 0..team {
            store.team.push(member(&format!("member{i}@acme.io")));
        }

        let asset_id = Uuid::new_v4();
        store.available.insert(asset_id, 5);

        let request_id = Uuid::new_v4();
        store.requests.insert(
            request_id,
            AssetRequest {
                id: request_id,
                asset_id,
                asset_name: "Laptop".to_string(),
                asset_type: AssetType::Returnable,
                requester_email: EMPLOYEE.to_string(),
                requester_name: "Ana".to_string(),
                hr_email: HR.to_string(),
                status: RequestStatus::Pending,
                note: None,
                request_date: Utc::now(),
                action_date: None,
            },
        );
        (store, asset_id, request_id)
    }

    fn change(status: RequestStatus) -> UpdateStatusPayload {
        UpdateStatusPayload { status, company_name: None, company_logo: None }
    }

    #[tokio::test]
    async fn approval_below_limit_adds_member_and_decrements() {
        let (mut store, asset_id, request_id) = setup(5, 4);

        let updated = apply_status_change(&mut store, HR, request_id, &change(RequestStatus::Approved))
            .await
            .unwrap();

        assert_eq!(updated.status, RequestStatus::Approved);
        assert!(updated.action_date.is_some());
        assert_eq!(store.available[&asset_id], 4);
        assert_eq!(store.team.len(), 5);

        let employee = &store.users[EMPLOYEE];
        assert_eq!(employee.company_name.as_deref(), Some("Acme"));
        assert_eq!(employee.company_logo.as_deref(), Some("https://acme.io/logo.png"));
    }

    #[tokio::test]
    async fn approval_at_limit_is_rejected_without_writes() {
        let (mut store, asset_id, request_id) = setup(5, 5);

        let result = apply_status_change(&mut store, HR, request_id, &change(RequestStatus::Approved)).await;

        assert!(matches!(result, Err(AppError::LimitReached)));
        assert_eq!(store.requests[&request_id].status, RequestStatus::Pending);
        assert_eq!(store.available[&asset_id], 5);
        assert_eq!(store.team.len(), 5);
    }

    #[tokio::test]
    async fn existing_member_is_approved_even_at_limit() {
        let (mut store, asset_id, request_id) = setup(1, 0);
        store.team.push(member(EMPLOYEE));

        apply_status_change(&mut store, HR, request_id, &change(RequestStatus::Approved))
            .await
            .unwrap();

        assert_eq!(store.available[&asset_id], 4);
        assert_eq!(store.team.len(), 1);
    }

    #[tokio::test]
    async fn approving_twice_decrements_twice() {
        let (mut store, asset_id, request_id) = setup(5, 0);

        for _ in 0..2 {
            apply_status_change(&mut store, HR, request_id, &change(RequestStatus::Approved))
                .await
                .unwrap();
        }

        assert_eq!(store.available[&asset_id], 3);
        // O segundo aprovar já encontra o funcionário na equipe
        assert_eq!(store.team.len(), 1);
    }

    #[tokio::test]
    async fn returning_increments_by_exactly_one() {
        let (mut store, asset_id, request_id) = setup(5, 0);

        apply_status_change(&mut store, EMPLOYEE, request_id, &change(RequestStatus::Returned))
            .await
            .unwrap();

        assert_eq!(store.available[&asset_id], 6);
        assert_eq!(store.requests[&request_id].status, RequestStatus::Returned);
    }

    #[tokio::test]
    async fn rejection_touches_nothing_but_status() {
        let (mut store, asset_id, request_id) = setup(5, 0);

        apply_status_change(&mut store, HR, request_id, &change(RequestStatus::Rejected))
            .await
            .unwrap();

        assert_eq!(store.available[&asset_id], 5);
        assert!(store.team.is_empty());
        assert_eq!(store.requests[&request_id].status, RequestStatus::Rejected);
    }

    #[tokio::test]
    async fn outsider_cannot_change_status() {
        let (mut store, _, request_id) = setup(5, 0);

        for status in [RequestStatus::Approved, RequestStatus::Rejected, RequestStatus::Returned] {
            let result = apply_status_change(&mut store, "mallory@evil.io", request_id, &change(status)).await;
            assert!(matches!(result, Err(AppError::Forbidden(_))));
        }
        assert_eq!(store.requests[&request_id].status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn employee_can_only_return() {
        let (mut store, asset_id, request_id) = setup(5, 0);

        for status in [RequestStatus::Approved, RequestStatus::Rejected] {
            let result = apply_status_change(&mut store, EMPLOYEE, request_id, &change(status)).await;
            assert!(matches!(result, Err(AppError::Forbidden(_))));
        }
        assert_eq!(store.available[&asset_id], 5);
    }

    #[tokio::test]
    async fn company_fields_from_payload_win_over_hr_record() {
        let (mut store, _, request_id) = setup(5, 0);
        let payload = UpdateStatusPayload {
            status: RequestStatus::Approved,
            company_name: Some("Acme Brasil".to_string()),
            company_logo: None,
        };

        apply_status_change(&mut store, HR, request_id, &payload).await.unwrap();

        assert_eq!(store.team[0].company_name.as_deref(), Some("Acme Brasil"));
        assert_eq!(store.team[0].company_logo.as_deref(), Some("https://acme.io/logo.png"));
    }

    #[tokio::test]
    async fn unknown_request_is_not_found() {
        let (mut store, _, _) = setup(5, 0);
        let result = apply_status_change(&mut store, HR, Uuid::new_v4(), &change(RequestStatus::Approved)).await;
        assert!(matches!(result, Err(AppError::RequestNotFound)));
    }

    #[test]
    fn team_limit_rule() {
        assert!(check_team_limit(false, 4, 5).is_ok());
        assert!(matches!(check_team_limit(false, 5, 5), Err(AppError::LimitReached)));
        assert!(check_team_limit(true, 5, 5).is_ok());
        assert!(matches!(check_team_limit(false, 0, 0), Err(AppError::LimitReached)));
    }
}
