use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::plan_pricings::PlanPricingEntity;
use crate::domain::entities::plan_quotas::PlanQuotaEntity;
use crate::domain::entities::plans::{InsertPlanEntity, PlanEntity};
use crate::domain::entities::quotas::QuotaEntity;
use crate::domain::value_objects::plans::{PlanCopyPricing, PlanCopyQuota, PlanListFilter};

#[async_trait]
#[automock]
pub trait PlanRepository {
    async fn find_by_id(&self, plan_id: Uuid) -> Result<Option<PlanEntity>>;

    /// Plans matching the admin filter, each with its cheapest price.
    async fn list(&self, filter: PlanListFilter) -> Result<Vec<(PlanEntity, Option<i32>)>>;

    async fn quotas_for_plan(&self, plan_id: Uuid)
    -> Result<Vec<(PlanQuotaEntity, QuotaEntity)>>;

    async fn pricings_for_plan(&self, plan_id: Uuid) -> Result<Vec<PlanPricingEntity>>;

    async fn find_plan_pricing(
        &self,
        plan_id: Uuid,
        pricing_id: Uuid,
    ) -> Result<Option<PlanPricingEntity>>;

    /// Inserts the plan copy and re-attaches the given pricing and quota
    /// rows to it in one transaction. Returns the new plan id.
    async fn insert_copy(
        &self,
        plan: InsertPlanEntity,
        pricings: Vec<PlanCopyPricing>,
        quotas: Vec<PlanCopyQuota>,
    ) -> Result<Uuid>;
}
