use std::sync::Arc;

use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::billing_infos::BillingInfoEntity;
use crate::domain::entities::orders::OrderEntity;
use crate::domain::repositories::{
    billing_infos::BillingInfoRepository, invoices::InvoiceRepository, orders::OrderRepository,
};
use crate::domain::value_objects::batch::BatchReport;
use crate::domain::value_objects::enums::invoice_types::InvoiceType;
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::invoices::{
    InvoiceDraft, InvoiceDto, InvoiceListFilter, IssuedInvoice, IssuerInfo,
};
use crate::domain::value_objects::money;

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("order not found")]
    OrderNotFound,
    #[error("order is not completed, nothing to invoice")]
    OrderNotCompleted,
    #[error("an invoice of this type already exists for the order")]
    AlreadyIssued,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl InvoiceError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            InvoiceError::OrderNotFound => StatusCode::NOT_FOUND,
            InvoiceError::OrderNotCompleted | InvoiceError::AlreadyIssued => StatusCode::CONFLICT,
            InvoiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type InvoiceResult<T> = std::result::Result<T, InvoiceError>;

pub struct InvoicingUseCase<O, I, B>
where
    O: OrderRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    B: BillingInfoRepository + Send + Sync + 'static,
{
    order_repo: Arc<O>,
    invoice_repo: Arc<I>,
    billing_info_repo: Arc<B>,
    issuer: IssuerInfo,
    payment_grace_days: u32,
}

impl<O, I, B> InvoicingUseCase<O, I, B>
where
    O: OrderRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    B: BillingInfoRepository + Send + Sync + 'static,
{
    pub fn new(
        order_repo: Arc<O>,
        invoice_repo: Arc<I>,
        billing_info_repo: Arc<B>,
        issuer: IssuerInfo,
        payment_grace_days: u32,
    ) -> Self {
        Self {
            order_repo,
            invoice_repo,
            billing_info_repo,
            issuer,
            payment_grace_days,
        }
    }

    pub async fn list(&self, filter: InvoiceListFilter) -> InvoiceResult<Vec<InvoiceDto>> {
        let invoices = self
            .invoice_repo
            .list(filter)
            .await
            .map_err(InvoiceError::Internal)?;
        Ok(invoices.into_iter().map(InvoiceDto::from).collect())
    }

    /// Issues a document of the given type for a completed order. Per
    /// (order, type) the operation happens at most once; repeats are
    /// rejected, never duplicated.
    pub async fn create_for_order(
        &self,
        order_id: Uuid,
        invoice_type: InvoiceType,
    ) -> InvoiceResult<IssuedInvoice> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await
            .map_err(InvoiceError::Internal)?
            .ok_or(InvoiceError::OrderNotFound)?;

        if OrderStatus::from_str(&order.status) != Some(OrderStatus::Completed) {
            warn!(
                %order_id,
                status = %order.status,
                "invoicing: refusing to invoice a non-completed order"
            );
            return Err(InvoiceError::OrderNotCompleted);
        }

        if self
            .invoice_repo
            .exists_for_order(order_id, invoice_type)
            .await
            .map_err(InvoiceError::Internal)?
        {
            warn!(
                %order_id,
                invoice_type = %invoice_type,
                "invoicing: document already issued"
            );
            return Err(InvoiceError::AlreadyIssued);
        }

        let billing_info = self
            .billing_info_repo
            .find_by_user(order.user_id)
            .await
            .map_err(InvoiceError::Internal)?;

        let draft = self.build_draft(&order, invoice_type, billing_info);
        let issued = self
            .invoice_repo
            .create_numbered(draft)
            .await
            .map_err(InvoiceError::Internal)?
            // a concurrent issue beat us to the insert
            .ok_or(InvoiceError::AlreadyIssued)?;

        info!(
            %order_id,
            invoice_type = %invoice_type,
            full_number = %issued.full_number,
            "invoicing: document issued"
        );
        Ok(issued)
    }

    pub async fn create_for_orders(
        &self,
        order_ids: Vec<Uuid>,
        invoice_type: InvoiceType,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        for order_id in order_ids {
            match self.create_for_order(order_id, invoice_type).await {
                Ok(_) => report.record_ok(order_id),
                Err(error) => report.record_err(order_id, &error),
            }
        }
        report
    }

    fn build_draft(
        &self,
        order: &OrderEntity,
        invoice_type: InvoiceType,
        billing_info: Option<BillingInfoEntity>,
    ) -> InvoiceDraft {
        let issued = Utc::now().date_naive();
        let total_net_minor = order.amount_minor;
        let tax_total_minor = order
            .tax_rate_bp
            .map(|rate| money::tax_total_minor(total_net_minor, rate))
            .unwrap_or(0);

        // Buyer columns are snapshots; a user without billing info gets
        // blank ones, as on the paper document.
        let billing = billing_info.unwrap_or_else(|| blank_billing_info(order.user_id));
        let require_shipment = [
            billing.shipping_name.as_deref(),
            billing.shipping_street.as_deref(),
            billing.shipping_zipcode.as_deref(),
            billing.shipping_city.as_deref(),
        ]
        .iter()
        .any(|field| field.map(|value| !value.is_empty()).unwrap_or(false));

        InvoiceDraft {
            order_id: order.id,
            user_id: order.user_id,
            invoice_type,
            issued,
            selling_date: order.completed_at.map(|completed| completed.date_naive()),
            payment_date: issued + Duration::days(self.payment_grace_days.into()),
            unit_price_net_minor: order.amount_minor,
            quantity: 1,
            total_net_minor,
            tax_total_minor,
            total_minor: total_net_minor + tax_total_minor,
            tax_rate_bp: order.tax_rate_bp,
            rebate_minor: 0,
            currency: order.currency.clone(),
            item_description: order
                .flat_name
                .clone()
                .unwrap_or_else(|| "Subscription plan".to_string()),
            buyer_name: billing.name,
            buyer_street: billing.street,
            buyer_zipcode: billing.zipcode,
            buyer_city: billing.city,
            buyer_country: billing.country,
            buyer_tax_number: billing.tax_number.unwrap_or_default(),
            shipping_name: billing.shipping_name.unwrap_or_default(),
            shipping_street: billing.shipping_street.unwrap_or_default(),
            shipping_zipcode: billing.shipping_zipcode.unwrap_or_default(),
            shipping_city: billing.shipping_city.unwrap_or_default(),
            require_shipment,
            issuer: self.issuer.clone(),
        }
    }
}

fn blank_billing_info(user_id: Uuid) -> BillingInfoEntity {
    let now = Utc::now();
    BillingInfoEntity {
        id: Uuid::nil(),
        user_id,
        name: String::new(),
        street: String::new(),
        zipcode: String::new(),
        city: String::new(),
        country: String::new(),
        tax_number: None,
        shipping_name: None,
        shipping_street: None,
        shipping_zipcode: None,
        shipping_city: None,
        created_at: now,
        updated_at: now,
    }
}
