use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::domain::repositories::{plans::PlanRepository, user_plans::UserPlanRepository};
use crate::domain::value_objects::plans::QuotaMap;
use crate::domain::value_objects::user_plans::{UserPlanDto, UserPlanListFilter};

#[derive(Debug, Error)]
pub enum UserPlanError {
    #[error("user has no plan assigned")]
    UserPlanNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UserPlanError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            UserPlanError::UserPlanNotFound => StatusCode::NOT_FOUND,
            UserPlanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UserPlanResult<T> = std::result::Result<T, UserPlanError>;

pub struct UserPlanUseCase<U, P>
where
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    user_plan_repo: Arc<U>,
    plan_repo: Arc<P>,
}

impl<U, P> UserPlanUseCase<U, P>
where
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(user_plan_repo: Arc<U>, plan_repo: Arc<P>) -> Self {
        Self {
            user_plan_repo,
            plan_repo,
        }
    }

    pub async fn list(&self, filter: UserPlanListFilter) -> UserPlanResult<Vec<UserPlanDto>> {
        let rows = self
            .user_plan_repo
            .list(filter)
            .await
            .map_err(UserPlanError::Internal)?;
        Ok(rows
            .into_iter()
            .map(|(user_plan, recurring)| UserPlanDto::from_entities(user_plan, recurring))
            .collect())
    }

    /// Resolves the quotas granted to a user through their current plan,
    /// keyed by quota codename. `None` means unlimited.
    pub async fn quota_map(&self, user_id: Uuid) -> UserPlanResult<QuotaMap> {
        let user_plan = self
            .user_plan_repo
            .find_by_user(user_id)
            .await
            .map_err(UserPlanError::Internal)?
            .ok_or(UserPlanError::UserPlanNotFound)?;

        let rows = self
            .plan_repo
            .quotas_for_plan(user_plan.plan_id)
            .await
            .map_err(UserPlanError::Internal)?;

        Ok(rows
            .into_iter()
            .map(|(plan_quota, quota)| (quota.codename, plan_quota.value))
            .collect())
    }

    /// Sweeps dated, expired, still-active assignments and clears their
    /// active flag.
    pub async fn deactivate_expired(&self) -> UserPlanResult<usize> {
        let today = Utc::now().date_naive();
        let affected = self
            .user_plan_repo
            .deactivate_expired(today)
            .await
            .map_err(UserPlanError::Internal)?;

        info!(affected, "user_plans: expired plans deactivated");
        Ok(affected)
    }
}
