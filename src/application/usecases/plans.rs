use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::plans::InsertPlanEntity;
use crate::domain::repositories::plans::PlanRepository;
use crate::domain::value_objects::batch::BatchReport;
use crate::domain::value_objects::plans::{
    PlanCopyPricing, PlanCopyQuota, PlanDto, PlanListFilter, QuotaMap,
};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("plan not found")]
    PlanNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PlanError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PlanError::PlanNotFound => StatusCode::NOT_FOUND,
            PlanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PlanResult<T> = std::result::Result<T, PlanError>;

pub struct PlanAdminUseCase<P>
where
    P: PlanRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
}

impl<P> PlanAdminUseCase<P>
where
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(plan_repo: Arc<P>) -> Self {
        Self { plan_repo }
    }

    pub async fn list(&self, filter: PlanListFilter) -> PlanResult<Vec<PlanDto>> {
        let price_range = filter.price_range;
        let plans = self
            .plan_repo
            .list(filter)
            .await
            .map_err(PlanError::Internal)?;

        Ok(plans
            .into_iter()
            .filter(|(_, min_price_minor)| {
                price_range
                    .map(|range| range.matches(*min_price_minor))
                    .unwrap_or(true)
            })
            .map(|(plan, min_price_minor)| PlanDto::from_entity(plan, min_price_minor))
            .collect())
    }

    pub async fn quota_map(&self, plan_id: Uuid) -> PlanResult<QuotaMap> {
        self.plan_repo
            .find_by_id(plan_id)
            .await
            .map_err(PlanError::Internal)?
            .ok_or(PlanError::PlanNotFound)?;

        let rows = self
            .plan_repo
            .quotas_for_plan(plan_id)
            .await
            .map_err(PlanError::Internal)?;

        Ok(rows
            .into_iter()
            .map(|(plan_quota, quota)| (quota.codename, plan_quota.value))
            .collect())
    }

    /// Duplicates a plan together with its pricing and quota rows. The
    /// copy gets a fresh identity and is neither available nor default,
    /// so it can be edited before being put on offer.
    pub async fn copy_plan(&self, plan_id: Uuid) -> PlanResult<Uuid> {
        let plan = self
            .plan_repo
            .find_by_id(plan_id)
            .await
            .map_err(PlanError::Internal)?
            .ok_or(PlanError::PlanNotFound)?;

        let pricings = self
            .plan_repo
            .pricings_for_plan(plan_id)
            .await
            .map_err(PlanError::Internal)?
            .into_iter()
            .map(|row| PlanCopyPricing {
                pricing_id: row.pricing_id,
                price_minor: row.price_minor,
                regular_price_minor: row.regular_price_minor,
                has_automatic_renewal: row.has_automatic_renewal,
                visible: row.visible,
                position: row.position,
            })
            .collect();

        let quotas = self
            .plan_repo
            .quotas_for_plan(plan_id)
            .await
            .map_err(PlanError::Internal)?
            .into_iter()
            .map(|(plan_quota, _)| PlanCopyQuota {
                quota_id: plan_quota.quota_id,
                value: plan_quota.value,
            })
            .collect();

        let copy = InsertPlanEntity {
            name: plan.name.clone(),
            description: plan.description.clone(),
            available: false,
            visible: plan.visible,
            is_default: None,
            position: plan.position,
            url: plan.url.clone(),
        };

        let copy_id = self
            .plan_repo
            .insert_copy(copy, pricings, quotas)
            .await
            .map_err(PlanError::Internal)?;

        info!(source = %plan_id, copy = %copy_id, "plans: plan copied");
        Ok(copy_id)
    }

    pub async fn copy_plans(&self, plan_ids: Vec<Uuid>) -> BatchReport {
        let mut report = BatchReport::default();
        for plan_id in plan_ids {
            match self.copy_plan(plan_id).await {
                Ok(_) => report.record_ok(plan_id),
                Err(error) => report.record_err(plan_id, &error),
            }
        }
        report
    }
}
