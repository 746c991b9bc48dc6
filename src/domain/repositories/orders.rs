use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::orders::{InsertOrderEntity, OrderEntity};
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::orders::{
    OrderCompletionPatch, OrderListFilter, OrderReturnPatch,
};

#[async_trait]
#[automock]
pub trait OrderRepository {
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderEntity>>;

    async fn list(&self, filter: OrderListFilter) -> Result<Vec<OrderEntity>>;

    async fn create(&self, insert_order: InsertOrderEntity) -> Result<Uuid>;

    /// Applies the completion patch and the user-plan upsert in one
    /// transaction, guarded on `status = 'new'`. Returns false when the
    /// guard did not match a row (the order moved on concurrently).
    async fn apply_completion(&self, order_id: Uuid, patch: OrderCompletionPatch)
    -> Result<bool>;

    /// Flips the order to `returned` and reverts the user plan's expiry
    /// in one transaction, guarded on `status = 'completed'`.
    async fn apply_return(&self, order_id: Uuid, patch: OrderReturnPatch) -> Result<bool>;

    /// Single-row status update guarded on `status = 'new'`.
    async fn set_status_from_new(&self, order_id: Uuid, status: OrderStatus) -> Result<bool>;
}
