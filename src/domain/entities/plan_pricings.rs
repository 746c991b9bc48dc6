use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::plan_pricings;

/// Price of one plan for one billing period, in minor currency units.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = plan_pricings)]
pub struct PlanPricingEntity {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub pricing_id: Uuid,
    pub price_minor: i32,
    pub regular_price_minor: Option<i32>,
    pub has_automatic_renewal: bool,
    pub visible: bool,
    pub position: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = plan_pricings)]
pub struct InsertPlanPricingEntity {
    pub plan_id: Uuid,
    pub pricing_id: Uuid,
    pub price_minor: i32,
    pub regular_price_minor: Option<i32>,
    pub has_automatic_renewal: bool,
    pub visible: bool,
    pub position: i32,
}
