use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::plan_quotas;

/// Value of one quota on one plan. A null value means unlimited.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = plan_quotas)]
pub struct PlanQuotaEntity {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub quota_id: Uuid,
    pub value: Option<i64>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = plan_quotas)]
pub struct InsertPlanQuotaEntity {
    pub plan_id: Uuid,
    pub quota_id: Uuid,
    pub value: Option<i64>,
}
