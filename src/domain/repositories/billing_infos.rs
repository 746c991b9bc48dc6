use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::billing_infos::{BillingInfoEntity, InsertBillingInfoEntity};

#[async_trait]
#[automock]
pub trait BillingInfoRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<BillingInfoEntity>>;

    /// Inserts or replaces the user's billing info and returns the stored
    /// row.
    async fn upsert(&self, row: InsertBillingInfoEntity) -> Result<BillingInfoEntity>;
}
