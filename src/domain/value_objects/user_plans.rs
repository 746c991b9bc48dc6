use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::recurring_user_plans::RecurringUserPlanEntity;
use crate::domain::entities::user_plans::UserPlanEntity;

#[derive(Debug, Clone, Serialize)]
pub struct UserPlanDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub expires_on: Option<NaiveDate>,
    pub active: bool,
    pub branches: i32,
    pub students: i32,
    pub recurring: Option<RecurringDto>,
}

/// Renewal columns surfaced on the admin user-plan listing.
#[derive(Debug, Clone, Serialize)]
pub struct RecurringDto {
    pub payment_provider: Option<String>,
    pub pricing_id: Option<Uuid>,
    pub renewal_triggered_by: String,
    pub token_verified: bool,
    pub card_expire_year: Option<i32>,
    pub card_expire_month: Option<i32>,
    pub card_masked_number: Option<String>,
}

impl UserPlanDto {
    pub fn from_entities(
        user_plan: UserPlanEntity,
        recurring: Option<RecurringUserPlanEntity>,
    ) -> Self {
        Self {
            id: user_plan.id,
            user_id: user_plan.user_id,
            plan_id: user_plan.plan_id,
            expires_on: user_plan.expires_on,
            active: user_plan.active,
            branches: user_plan.branches,
            students: user_plan.students,
            recurring: recurring.map(|row| RecurringDto {
                payment_provider: row.payment_provider,
                pricing_id: row.pricing_id,
                renewal_triggered_by: row.renewal_triggered_by,
                token_verified: row.token_verified,
                card_expire_year: row.card_expire_year,
                card_expire_month: row.card_expire_month,
                card_masked_number: row.card_masked_number,
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPlanListFilter {
    pub active: Option<bool>,
    pub plan_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserIdsModel {
    pub user_ids: Vec<Uuid>,
}
