use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::orders;

/// A purchase intent. `plan_extended_from`/`plan_extended_until` record the
/// expiry window a completion applied, so a later return can undo it.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = orders)]
pub struct OrderEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub pricing_id: Option<Uuid>,
    pub flat_name: Option<String>,
    pub amount_minor: i32,
    pub tax_rate_bp: Option<i32>,
    pub currency: String,
    pub status: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub plan_extended_from: Option<NaiveDate>,
    pub plan_extended_until: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub struct InsertOrderEntity {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub pricing_id: Option<Uuid>,
    pub flat_name: Option<String>,
    pub amount_minor: i32,
    pub tax_rate_bp: Option<i32>,
    pub currency: String,
    pub status: String,
}
