use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{OptionalExtension, RunQueryDsl, prelude::*};
use uuid::Uuid;

use crate::domain::entities::pricings::PricingEntity;
use crate::domain::repositories::pricings::PricingRepository;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::pricings;

pub struct PricingPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PricingPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PricingRepository for PricingPostgres {
    async fn find_by_id(&self, pricing_id: Uuid) -> Result<Option<PricingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let pricing = pricings::table
            .filter(pricings::id.eq(pricing_id))
            .select(PricingEntity::as_select())
            .first::<PricingEntity>(&mut conn)
            .optional()?;

        Ok(pricing)
    }
}
