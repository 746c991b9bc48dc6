use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::plans;

/// A subscription tier. `is_default` is three-valued on purpose: only `true`
/// marks the default plan and carries a unique index, while `NULL` and
/// `false` both mean "not default".
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = plans)]
pub struct PlanEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub available: bool,
    pub visible: bool,
    pub is_default: Option<bool>,
    pub position: i32,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = plans)]
pub struct InsertPlanEntity {
    pub name: String,
    pub description: Option<String>,
    pub available: bool,
    pub visible: bool,
    pub is_default: Option<bool>,
    pub position: i32,
    pub url: Option<String>,
}
