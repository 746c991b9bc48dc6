use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::recurring_user_plans::RecurringUserPlanEntity;
use crate::domain::entities::user_plans::UserPlanEntity;
use crate::domain::value_objects::user_plans::UserPlanListFilter;

#[async_trait]
#[automock]
pub trait UserPlanRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<UserPlanEntity>>;

    async fn find_with_recurring(
        &self,
        user_id: Uuid,
    ) -> Result<Option<(UserPlanEntity, Option<RecurringUserPlanEntity>)>>;

    async fn list(
        &self,
        filter: UserPlanListFilter,
    ) -> Result<Vec<(UserPlanEntity, Option<RecurringUserPlanEntity>)>>;

    /// Clears the active flag on every dated, expired, still-active plan.
    /// Returns the number of rows touched.
    async fn deactivate_expired(&self, today: NaiveDate) -> Result<usize>;
}
