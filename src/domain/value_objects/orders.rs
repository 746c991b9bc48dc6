use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::orders::OrderEntity;
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::money;

#[derive(Debug, Clone, Serialize)]
pub struct OrderDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub pricing_id: Option<Uuid>,
    pub flat_name: Option<String>,
    pub amount_minor: i32,
    pub tax_rate_bp: Option<i32>,
    pub total_minor: i32,
    pub currency: String,
    pub status: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub plan_extended_from: Option<NaiveDate>,
    pub plan_extended_until: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<OrderEntity> for OrderDto {
    fn from(value: OrderEntity) -> Self {
        let total_minor = money::gross_minor(value.amount_minor, value.tax_rate_bp);
        Self {
            id: value.id,
            user_id: value.user_id,
            plan_id: value.plan_id,
            pricing_id: value.pricing_id,
            flat_name: value.flat_name,
            amount_minor: value.amount_minor,
            tax_rate_bp: value.tax_rate_bp,
            total_minor,
            currency: value.currency,
            status: value.status,
            completed_at: value.completed_at,
            plan_extended_from: value.plan_extended_from,
            plan_extended_until: value.plan_extended_until,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListFilter {
    pub status: Option<OrderStatus>,
    pub plan_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderModel {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub pricing_id: Option<Uuid>,
    pub flat_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderIdsModel {
    pub order_ids: Vec<Uuid>,
}

/// Everything a completion writes, applied in one transaction together
/// with the status flip.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCompletionPatch {
    pub completed_at: DateTime<Utc>,
    pub plan_extended_from: Option<NaiveDate>,
    pub plan_extended_until: Option<NaiveDate>,
    pub user_plan: UserPlanUpsert,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserPlanUpsert {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub expires_on: Option<NaiveDate>,
    pub active: bool,
}

/// Revert applied when a completed order is returned. A `None` target
/// leaves the user plan untouched (nothing was extended, or the plan
/// never expires).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReturnPatch {
    pub user_id: Uuid,
    pub revert_expires_on_to: Option<NaiveDate>,
}
