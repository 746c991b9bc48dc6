use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::pricings::PricingEntity;

#[async_trait]
#[automock]
pub trait PricingRepository {
    async fn find_by_id(&self, pricing_id: Uuid) -> Result<Option<PricingEntity>>;
}
