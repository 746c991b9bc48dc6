use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::invoices;

/// A billing document derived from a completed order. Buyer, shipping and
/// issuer columns are snapshots taken at issue time; later edits to billing
/// info must not rewrite history.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = invoices)]
pub struct InvoiceEntity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub number: i32,
    pub full_number: String,
    pub type_: String,
    pub issued: NaiveDate,
    pub issued_duplicate: Option<NaiveDate>,
    pub selling_date: Option<NaiveDate>,
    pub payment_date: NaiveDate,
    pub unit_price_net_minor: i32,
    pub quantity: i32,
    pub total_net_minor: i32,
    pub tax_total_minor: i32,
    pub total_minor: i32,
    pub tax_rate_bp: Option<i32>,
    pub rebate_minor: i32,
    pub currency: String,
    pub item_description: String,
    pub buyer_name: String,
    pub buyer_street: String,
    pub buyer_zipcode: String,
    pub buyer_city: String,
    pub buyer_country: String,
    pub buyer_tax_number: String,
    pub shipping_name: String,
    pub shipping_street: String,
    pub shipping_zipcode: String,
    pub shipping_city: String,
    pub require_shipment: bool,
    pub issuer_name: String,
    pub issuer_street: String,
    pub issuer_zipcode: String,
    pub issuer_city: String,
    pub issuer_country: String,
    pub issuer_tax_number: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoices)]
pub struct InsertInvoiceEntity {
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub number: i32,
    pub full_number: String,
    pub type_: String,
    pub issued: NaiveDate,
    pub selling_date: Option<NaiveDate>,
    pub payment_date: NaiveDate,
    pub unit_price_net_minor: i32,
    pub quantity: i32,
    pub total_net_minor: i32,
    pub tax_total_minor: i32,
    pub total_minor: i32,
    pub tax_rate_bp: Option<i32>,
    pub rebate_minor: i32,
    pub currency: String,
    pub item_description: String,
    pub buyer_name: String,
    pub buyer_street: String,
    pub buyer_zipcode: String,
    pub buyer_city: String,
    pub buyer_country: String,
    pub buyer_tax_number: String,
    pub shipping_name: String,
    pub shipping_street: String,
    pub shipping_zipcode: String,
    pub shipping_city: String,
    pub require_shipment: bool,
    pub issuer_name: String,
    pub issuer_street: String,
    pub issuer_zipcode: String,
    pub issuer_city: String,
    pub issuer_country: String,
    pub issuer_tax_number: String,
}
