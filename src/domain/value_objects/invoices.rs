use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::invoices::InvoiceEntity;
use crate::domain::value_objects::enums::invoice_types::InvoiceType;

/// Human-facing document number: sequential counter, issue month and year,
/// prefixed for non-primary document types.
pub fn full_number(number: i32, invoice_type: InvoiceType, issued: NaiveDate) -> String {
    use chrono::Datelike;
    format!(
        "{}{}/{:02}/{}",
        invoice_type.number_prefix(),
        number,
        issued.month(),
        issued.year()
    )
}

/// Seller identity stamped onto issued documents.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuerInfo {
    pub name: String,
    pub street: String,
    pub zipcode: String,
    pub city: String,
    pub country: String,
    pub tax_number: Option<String>,
}

/// A fully computed invoice awaiting its sequential number; the number is
/// assigned atomically at insert time.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub invoice_type: InvoiceType,
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
    pub issuer: IssuerInfo,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IssuedInvoice {
    pub id: Uuid,
    pub number: i32,
    pub full_number: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateInvoicesModel {
    pub order_ids: Vec<Uuid>,
    #[serde(default)]
    pub invoice_type: InvoiceType,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceListFilter {
    pub invoice_type: Option<InvoiceType>,
    pub currency: Option<String>,
    pub order_id: Option<Uuid>,
}

/// Admin list projection of an issued invoice.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDto {
    pub id: Uuid,
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub full_number: String,
    pub invoice_type: String,
    pub issued: NaiveDate,
    pub payment_date: NaiveDate,
    pub total_net_minor: i32,
    pub total_minor: i32,
    pub tax_rate_bp: Option<i32>,
    pub currency: String,
    pub buyer_name: String,
    pub buyer_city: String,
    pub buyer_tax_number: String,
}

impl From<InvoiceEntity> for InvoiceDto {
    fn from(value: InvoiceEntity) -> Self {
        Self {
            id: value.id,
            order_id: value.order_id,
            user_id: value.user_id,
            full_number: value.full_number,
            invoice_type: value.type_,
            issued: value.issued,
            payment_date: value.payment_date,
            total_net_minor: value.total_net_minor,
            total_minor: value.total_minor,
            tax_rate_bp: value.tax_rate_bp,
            currency: value.currency,
            buyer_name: value.buyer_name,
            buyer_city: value.buyer_city,
            buyer_tax_number: value.buyer_tax_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_number_with_month_and_year() {
        let issued = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(full_number(7, InvoiceType::Invoice, issued), "7/03/2026");
    }

    #[test]
    fn prefixes_secondary_document_types() {
        let issued = NaiveDate::from_ymd_opt(2026, 11, 30).unwrap();
        assert_eq!(
            full_number(12, InvoiceType::Duplicate, issued),
            "DUP 12/11/2026"
        );
        assert_eq!(
            full_number(3, InvoiceType::OrderConfirmation, issued),
            "ORD 3/11/2026"
        );
    }
}
