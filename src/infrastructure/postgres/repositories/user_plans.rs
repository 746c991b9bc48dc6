use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::{OptionalExtension, RunQueryDsl, prelude::*, update};
use uuid::Uuid;

use crate::domain::entities::recurring_user_plans::RecurringUserPlanEntity;
use crate::domain::entities::user_plans::UserPlanEntity;
use crate::domain::repositories::user_plans::UserPlanRepository;
use crate::domain::value_objects::user_plans::UserPlanListFilter;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::{recurring_user_plans, user_plans};

pub struct UserPlanPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UserPlanPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserPlanRepository for UserPlanPostgres {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<UserPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let user_plan = user_plans::table
            .filter(user_plans::user_id.eq(user_id))
            .select(UserPlanEntity::as_select())
            .first::<UserPlanEntity>(&mut conn)
            .optional()?;

        Ok(user_plan)
    }

    async fn find_with_recurring(
        &self,
        user_id: Uuid,
    ) -> Result<Option<(UserPlanEntity, Option<RecurringUserPlanEntity>)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = user_plans::table
            .left_join(recurring_user_plans::table)
            .filter(user_plans::user_id.eq(user_id))
            .select((
                UserPlanEntity::as_select(),
                Option::<RecurringUserPlanEntity>::as_select(),
            ))
            .first::<(UserPlanEntity, Option<RecurringUserPlanEntity>)>(&mut conn)
            .optional()?;

        Ok(row)
    }

    async fn list(
        &self,
        filter: UserPlanListFilter,
    ) -> Result<Vec<(UserPlanEntity, Option<RecurringUserPlanEntity>)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = user_plans::table
            .left_join(recurring_user_plans::table)
            .into_boxed();
        if let Some(active) = filter.active {
            query = query.filter(user_plans::active.eq(active));
        }
        if let Some(plan_id) = filter.plan_id {
            query = query.filter(user_plans::plan_id.eq(plan_id));
        }

        let rows = query
            .order(user_plans::created_at.desc())
            .select((
                UserPlanEntity::as_select(),
                Option::<RecurringUserPlanEntity>::as_select(),
            ))
            .load::<(UserPlanEntity, Option<RecurringUserPlanEntity>)>(&mut conn)?;

        Ok(rows)
    }

    async fn deactivate_expired(&self, today: NaiveDate) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(
            user_plans::table
                .filter(user_plans::active.eq(true))
                .filter(user_plans::expires_on.is_not_null())
                .filter(user_plans::expires_on.lt(today)),
        )
        .set((
            user_plans::active.eq(false),
            user_plans::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
