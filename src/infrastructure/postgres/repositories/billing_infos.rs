use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{OptionalExtension, RunQueryDsl, insert_into, prelude::*, upsert::excluded};
use uuid::Uuid;

use crate::domain::entities::billing_infos::{BillingInfoEntity, InsertBillingInfoEntity};
use crate::domain::repositories::billing_infos::BillingInfoRepository;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::billing_infos;

pub struct BillingInfoPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BillingInfoPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BillingInfoRepository for BillingInfoPostgres {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<BillingInfoEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let billing_info = billing_infos::table
            .filter(billing_infos::user_id.eq(user_id))
            .select(BillingInfoEntity::as_select())
            .first::<BillingInfoEntity>(&mut conn)
            .optional()?;

        Ok(billing_info)
    }

    async fn upsert(&self, row: InsertBillingInfoEntity) -> Result<BillingInfoEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let stored = insert_into(billing_infos::table)
            .values(&row)
            .on_conflict(billing_infos::user_id)
            .do_update()
            .set((
                billing_infos::name.eq(excluded(billing_infos::name)),
                billing_infos::street.eq(excluded(billing_infos::street)),
                billing_infos::zipcode.eq(excluded(billing_infos::zipcode)),
                billing_infos::city.eq(excluded(billing_infos::city)),
                billing_infos::country.eq(excluded(billing_infos::country)),
                billing_infos::tax_number.eq(excluded(billing_infos::tax_number)),
                billing_infos::shipping_name.eq(excluded(billing_infos::shipping_name)),
                billing_infos::shipping_street.eq(excluded(billing_infos::shipping_street)),
                billing_infos::shipping_zipcode.eq(excluded(billing_infos::shipping_zipcode)),
                billing_infos::shipping_city.eq(excluded(billing_infos::shipping_city)),
                billing_infos::updated_at.eq(Utc::now()),
            ))
            .returning(BillingInfoEntity::as_returning())
            .get_result::<BillingInfoEntity>(&mut conn)?;

        Ok(stored)
    }
}
