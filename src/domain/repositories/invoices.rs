use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::invoices::InvoiceEntity;
use crate::domain::value_objects::enums::invoice_types::InvoiceType;
use crate::domain::value_objects::invoices::{InvoiceDraft, InvoiceListFilter, IssuedInvoice};

#[async_trait]
#[automock]
pub trait InvoiceRepository {
    async fn exists_for_order(&self, order_id: Uuid, invoice_type: InvoiceType) -> Result<bool>;

    /// Assigns the next sequential number for the issue year and inserts
    /// the document, re-checking per-(order, type) uniqueness inside the
    /// same transaction. Returns `None` when a concurrent insert won.
    async fn create_numbered(&self, draft: InvoiceDraft) -> Result<Option<IssuedInvoice>>;

    async fn list(&self, filter: InvoiceListFilter) -> Result<Vec<InvoiceEntity>>;
}
