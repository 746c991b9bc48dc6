use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::quotas;

/// A named, limited resource dimension a plan can grant. The codename is
/// referenced by external authorization checks and must not change after
/// creation.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = quotas)]
pub struct QuotaEntity {
    pub id: Uuid,
    pub codename: String,
    pub name: String,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub is_boolean: bool,
    pub position: i32,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
