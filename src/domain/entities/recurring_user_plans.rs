use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::recurring_user_plans;

/// Payment-provider token state enabling automatic renewal of a user plan.
/// A row exists only once renewal has been configured or attempted;
/// `token_verified` flips after the provider accepted the token at least
/// once.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = recurring_user_plans)]
pub struct RecurringUserPlanEntity {
    pub id: Uuid,
    pub user_plan_id: Uuid,
    pub pricing_id: Option<Uuid>,
    pub token: Option<String>,
    pub payment_provider: Option<String>,
    pub amount_minor: Option<i32>,
    pub tax_rate_bp: Option<i32>,
    pub currency: Option<String>,
    pub renewal_triggered_by: String,
    pub token_verified: bool,
    pub card_expire_year: Option<i32>,
    pub card_expire_month: Option<i32>,
    pub card_masked_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
