use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{Connection, OptionalExtension, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::orders::{InsertOrderEntity, OrderEntity};
use crate::domain::entities::user_plans::InsertUserPlanEntity;
use crate::domain::repositories::orders::OrderRepository;
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::orders::{
    OrderCompletionPatch, OrderListFilter, OrderReturnPatch,
};
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::{orders, user_plans};

pub struct OrderPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl OrderPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OrderRepository for OrderPostgres {
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order = orders::table
            .filter(orders::id.eq(order_id))
            .select(OrderEntity::as_select())
            .first::<OrderEntity>(&mut conn)
            .optional()?;

        Ok(order)
    }

    async fn list(&self, filter: OrderListFilter) -> Result<Vec<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = orders::table.into_boxed();
        if let Some(status) = filter.status {
            query = query.filter(orders::status.eq(status.to_string()));
        }
        if let Some(plan_id) = filter.plan_id {
            query = query.filter(orders::plan_id.eq(plan_id));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(orders::user_id.eq(user_id));
        }

        let results = query
            .order(orders::created_at.desc())
            .select(OrderEntity::as_select())
            .load::<OrderEntity>(&mut conn)?;

        Ok(results)
    }

    async fn create(&self, insert_order: InsertOrderEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order_id = insert_into(orders::table)
            .values(&insert_order)
            .returning(orders::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(order_id)
    }

    async fn apply_completion(
        &self,
        order_id: Uuid,
        patch: OrderCompletionPatch,
    ) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let now = Utc::now();

        conn.transaction::<bool, anyhow::Error, _>(|conn| {
            let updated = update(
                orders::table
                    .filter(orders::id.eq(order_id))
                    .filter(orders::status.eq(OrderStatus::New.to_string())),
            )
            .set((
                orders::status.eq(OrderStatus::Completed.to_string()),
                orders::completed_at.eq(Some(patch.completed_at)),
                orders::plan_extended_from.eq(patch.plan_extended_from),
                orders::plan_extended_until.eq(patch.plan_extended_until),
                orders::updated_at.eq(now),
            ))
            .execute(conn)?;

            if updated == 0 {
                return Ok(false);
            }

            insert_into(user_plans::table)
                .values(&InsertUserPlanEntity {
                    user_id: patch.user_plan.user_id,
                    plan_id: patch.user_plan.plan_id,
                    expires_on: patch.user_plan.expires_on,
                    active: patch.user_plan.active,
                    branches: 1,
                    students: 1,
                })
                .on_conflict(user_plans::user_id)
                .do_update()
                .set((
                    user_plans::plan_id.eq(patch.user_plan.plan_id),
                    user_plans::expires_on.eq(patch.user_plan.expires_on),
                    user_plans::active.eq(patch.user_plan.active),
                    user_plans::updated_at.eq(now),
                ))
                .execute(conn)?;

            Ok(true)
        })
    }

    async fn apply_return(&self, order_id: Uuid, patch: OrderReturnPatch) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let now = Utc::now();

        conn.transaction::<bool, anyhow::Error, _>(|conn| {
            let updated = update(
                orders::table
                    .filter(orders::id.eq(order_id))
                    .filter(orders::status.eq(OrderStatus::Completed.to_string())),
            )
            .set((
                orders::status.eq(OrderStatus::Returned.to_string()),
                orders::updated_at.eq(now),
            ))
            .execute(conn)?;

            if updated == 0 {
                return Ok(false);
            }

            if let Some(expires_on) = patch.revert_expires_on_to {
                update(user_plans::table.filter(user_plans::user_id.eq(patch.user_id)))
                    .set((
                        user_plans::expires_on.eq(Some(expires_on)),
                        user_plans::updated_at.eq(now),
                    ))
                    .execute(conn)?;
            }

            Ok(true)
        })
    }

    async fn set_status_from_new(&self, order_id: Uuid, status: OrderStatus) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let updated = update(
            orders::table
                .filter(orders::id.eq(order_id))
                .filter(orders::status.eq(OrderStatus::New.to_string())),
        )
        .set((
            orders::status.eq(status.to_string()),
            orders::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

        Ok(updated > 0)
    }
}
