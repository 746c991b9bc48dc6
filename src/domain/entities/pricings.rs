use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::pricings;

/// A billing period shared across plans, e.g. "monthly" = 30 days.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = pricings)]
pub struct PricingEntity {
    pub id: Uuid,
    pub name: String,
    pub period_days: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
