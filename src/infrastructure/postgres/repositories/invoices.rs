use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use diesel::{
    Connection, RunQueryDsl,
    dsl::{exists, max},
    insert_into,
    prelude::*,
};
use uuid::Uuid;

use crate::domain::entities::invoices::{InsertInvoiceEntity, InvoiceEntity};
use crate::domain::repositories::invoices::InvoiceRepository;
use crate::domain::value_objects::enums::invoice_types::InvoiceType;
use crate::domain::value_objects::invoices::{
    InvoiceDraft, InvoiceListFilter, IssuedInvoice, full_number,
};
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::invoices;

pub struct InvoicePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl InvoicePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl InvoiceRepository for InvoicePostgres {
    async fn exists_for_order(&self, order_id: Uuid, invoice_type: InvoiceType) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let already_issued = diesel::select(exists(
            invoices::table
                .filter(invoices::order_id.eq(order_id))
                .filter(invoices::type_.eq(invoice_type.to_string())),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(already_issued)
    }

    async fn create_numbered(&self, draft: InvoiceDraft) -> Result<Option<IssuedInvoice>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<Option<IssuedInvoice>, anyhow::Error, _>(|conn| {
            let type_str = draft.invoice_type.to_string();

            let already_issued = diesel::select(exists(
                invoices::table
                    .filter(invoices::order_id.eq(draft.order_id))
                    .filter(invoices::type_.eq(&type_str)),
            ))
            .get_result::<bool>(conn)?;
            if already_issued {
                return Ok(None);
            }

            // the counter restarts every issue year, per document type
            let year = draft.issued.year();
            let year_start =
                NaiveDate::from_ymd_opt(year, 1, 1).context("invalid issue year")?;
            let next_year_start =
                NaiveDate::from_ymd_opt(year + 1, 1, 1).context("invalid issue year")?;

            let last_number = invoices::table
                .filter(invoices::type_.eq(&type_str))
                .filter(invoices::issued.ge(year_start))
                .filter(invoices::issued.lt(next_year_start))
                .select(max(invoices::number))
                .first::<Option<i32>>(conn)?;
            let number = last_number.unwrap_or(0) + 1;
            let full_number = full_number(number, draft.invoice_type, draft.issued);

            let insert = InsertInvoiceEntity {
                order_id: draft.order_id,
                user_id: draft.user_id,
                number,
                full_number: full_number.clone(),
                type_: type_str,
                issued: draft.issued,
                selling_date: draft.selling_date,
                payment_date: draft.payment_date,
                unit_price_net_minor: draft.unit_price_net_minor,
                quantity: draft.quantity,
                total_net_minor: draft.total_net_minor,
                tax_total_minor: draft.tax_total_minor,
                total_minor: draft.total_minor,
                tax_rate_bp: draft.tax_rate_bp,
                rebate_minor: draft.rebate_minor,
                currency: draft.currency,
                item_description: draft.item_description,
                buyer_name: draft.buyer_name,
                buyer_street: draft.buyer_street,
                buyer_zipcode: draft.buyer_zipcode,
                buyer_city: draft.buyer_city,
                buyer_country: draft.buyer_country,
                buyer_tax_number: draft.buyer_tax_number,
                shipping_name: draft.shipping_name,
                shipping_street: draft.shipping_street,
                shipping_zipcode: draft.shipping_zipcode,
                shipping_city: draft.shipping_city,
                require_shipment: draft.require_shipment,
                issuer_name: draft.issuer.name,
                issuer_street: draft.issuer.street,
                issuer_zipcode: draft.issuer.zipcode,
                issuer_city: draft.issuer.city,
                issuer_country: draft.issuer.country,
                issuer_tax_number: draft.issuer.tax_number.unwrap_or_default(),
            };

            let invoice_id = insert_into(invoices::table)
                .values(&insert)
                .returning(invoices::id)
                .get_result::<Uuid>(conn)?;

            Ok(Some(IssuedInvoice {
                id: invoice_id,
                number,
                full_number,
            }))
        })
    }

    async fn list(&self, filter: InvoiceListFilter) -> Result<Vec<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = invoices::table.into_boxed();
        if let Some(invoice_type) = filter.invoice_type {
            query = query.filter(invoices::type_.eq(invoice_type.to_string()));
        }
        if let Some(currency) = filter.currency {
            query = query.filter(invoices::currency.eq(currency));
        }
        if let Some(order_id) = filter.order_id {
            query = query.filter(invoices::order_id.eq(order_id));
        }

        let results = query
            .order(invoices::issued.desc())
            .select(InvoiceEntity::as_select())
            .load::<InvoiceEntity>(&mut conn)?;

        Ok(results)
    }
}
