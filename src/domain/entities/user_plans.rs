use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::user_plans;

/// The live assignment of a plan to a user. One row per user.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = user_plans)]
pub struct UserPlanEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub expires_on: Option<NaiveDate>,
    pub active: bool,
    pub branches: i32,
    pub students: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserPlanEntity {
    /// `expires_on = NULL` means the plan never expires.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        match self.expires_on {
            Some(expires_on) => expires_on < today,
            None => false,
        }
    }

    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.active && !self.is_expired(today)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_plans)]
pub struct InsertUserPlanEntity {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub expires_on: Option<NaiveDate>,
    pub active: bool,
    pub branches: i32,
    pub students: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_plan(expires_on: Option<NaiveDate>, active: bool) -> UserPlanEntity {
        let now = Utc::now();
        UserPlanEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            expires_on,
            active,
            branches: 1,
            students: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn null_expiry_never_expires() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let plan = user_plan(None, true);

        assert!(!plan.is_expired(today));
        assert!(plan.is_active(today));
    }

    #[test]
    fn expiry_day_is_still_active() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let plan = user_plan(Some(today), true);

        assert!(plan.is_active(today));
    }

    #[test]
    fn past_expiry_is_inactive() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let plan = user_plan(today.pred_opt(), true);

        assert!(plan.is_expired(today));
        assert!(!plan.is_active(today));
    }

    #[test]
    fn deactivated_plan_is_inactive_regardless_of_expiry() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let plan = user_plan(None, false);

        assert!(!plan.is_active(today));
    }
}
