use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::billing_infos;

/// A user's invoicing address and tax identity. One row per user; the
/// shipping block is optional.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = billing_infos)]
pub struct BillingInfoEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub street: String,
    pub zipcode: String,
    pub city: String,
    pub country: String,
    pub tax_number: Option<String>,
    pub shipping_name: Option<String>,
    pub shipping_street: Option<String>,
    pub shipping_zipcode: Option<String>,
    pub shipping_city: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = billing_infos)]
pub struct InsertBillingInfoEntity {
    pub user_id: Uuid,
    pub name: String,
    pub street: String,
    pub zipcode: String,
    pub city: String,
    pub country: String,
    pub tax_number: Option<String>,
    pub shipping_name: Option<String>,
    pub shipping_street: Option<String>,
    pub shipping_zipcode: Option<String>,
    pub shipping_city: Option<String>,
}
