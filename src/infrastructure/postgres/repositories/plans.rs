use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{Connection, OptionalExtension, RunQueryDsl, dsl::min, insert_into, prelude::*};
use uuid::Uuid;

use crate::domain::entities::plan_pricings::{InsertPlanPricingEntity, PlanPricingEntity};
use crate::domain::entities::plan_quotas::{InsertPlanQuotaEntity, PlanQuotaEntity};
use crate::domain::entities::plans::{InsertPlanEntity, PlanEntity};
use crate::domain::entities::quotas::QuotaEntity;
use crate::domain::repositories::plans::PlanRepository;
use crate::domain::value_objects::plans::{PlanCopyPricing, PlanCopyQuota, PlanListFilter};
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::{plan_pricings, plan_quotas, plans, quotas};

pub struct PlanPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PlanPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PlanRepository for PlanPostgres {
    async fn find_by_id(&self, plan_id: Uuid) -> Result<Option<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let plan = plans::table
            .filter(plans::id.eq(plan_id))
            .select(PlanEntity::as_select())
            .first::<PlanEntity>(&mut conn)
            .optional()?;

        Ok(plan)
    }

    async fn list(&self, filter: PlanListFilter) -> Result<Vec<(PlanEntity, Option<i32>)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = plans::table.into_boxed();
        if let Some(available) = filter.available {
            query = query.filter(plans::available.eq(available));
        }
        if let Some(visible) = filter.visible {
            query = query.filter(plans::visible.eq(visible));
        }

        let rows = query
            .order(plans::position.asc())
            .select(PlanEntity::as_select())
            .load::<PlanEntity>(&mut conn)?;

        let cheapest: HashMap<Uuid, Option<i32>> = plan_pricings::table
            .group_by(plan_pricings::plan_id)
            .select((plan_pricings::plan_id, min(plan_pricings::price_minor)))
            .load::<(Uuid, Option<i32>)>(&mut conn)?
            .into_iter()
            .collect();

        Ok(rows
            .into_iter()
            .map(|plan| {
                let min_price = cheapest.get(&plan.id).copied().flatten();
                (plan, min_price)
            })
            .collect())
    }

    async fn quotas_for_plan(
        &self,
        plan_id: Uuid,
    ) -> Result<Vec<(PlanQuotaEntity, QuotaEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = plan_quotas::table
            .inner_join(quotas::table)
            .filter(plan_quotas::plan_id.eq(plan_id))
            .order(quotas::position.asc())
            .select((PlanQuotaEntity::as_select(), QuotaEntity::as_select()))
            .load::<(PlanQuotaEntity, QuotaEntity)>(&mut conn)?;

        Ok(rows)
    }

    async fn pricings_for_plan(&self, plan_id: Uuid) -> Result<Vec<PlanPricingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = plan_pricings::table
            .filter(plan_pricings::plan_id.eq(plan_id))
            .order(plan_pricings::position.asc())
            .select(PlanPricingEntity::as_select())
            .load::<PlanPricingEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn find_plan_pricing(
        &self,
        plan_id: Uuid,
        pricing_id: Uuid,
    ) -> Result<Option<PlanPricingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = plan_pricings::table
            .filter(plan_pricings::plan_id.eq(plan_id))
            .filter(plan_pricings::pricing_id.eq(pricing_id))
            .select(PlanPricingEntity::as_select())
            .first::<PlanPricingEntity>(&mut conn)
            .optional()?;

        Ok(row)
    }

    async fn insert_copy(
        &self,
        plan: InsertPlanEntity,
        pricings: Vec<PlanCopyPricing>,
        quotas: Vec<PlanCopyQuota>,
    ) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<Uuid, anyhow::Error, _>(|conn| {
            let copy_id = insert_into(plans::table)
                .values(&plan)
                .returning(plans::id)
                .get_result::<Uuid>(conn)?;

            let pricing_rows: Vec<InsertPlanPricingEntity> = pricings
                .into_iter()
                .map(|row| InsertPlanPricingEntity {
                    plan_id: copy_id,
                    pricing_id: row.pricing_id,
                    price_minor: row.price_minor,
                    regular_price_minor: row.regular_price_minor,
                    has_automatic_renewal: row.has_automatic_renewal,
                    visible: row.visible,
                    position: row.position,
                })
                .collect();
            insert_into(plan_pricings::table)
                .values(&pricing_rows)
                .execute(conn)?;

            let quota_rows: Vec<InsertPlanQuotaEntity> = quotas
                .into_iter()
                .map(|row| InsertPlanQuotaEntity {
                    plan_id: copy_id,
                    quota_id: row.quota_id,
                    value: row.value,
                })
                .collect();
            insert_into(plan_quotas::table)
                .values(&quota_rows)
                .execute(conn)?;

            Ok(copy_id)
        })
    }
}
