use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::entities::billing_infos::InsertBillingInfoEntity;
use crate::domain::repositories::billing_infos::BillingInfoRepository;
use crate::domain::value_objects::billing::{
    BillingInfoDto, BillingInfoPayload, clean_tax_number,
};

#[derive(Debug, Error)]
pub enum BillingInfoError {
    /// Field-level problems; each entry is keyed by the offending field so
    /// the caller can render it next to the input.
    #[error("billing info is invalid")]
    Validation(ValidationErrors),
    #[error("billing info not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BillingInfoError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            BillingInfoError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BillingInfoError::NotFound => StatusCode::NOT_FOUND,
            BillingInfoError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type BillingInfoResult<T> = std::result::Result<T, BillingInfoError>;

pub struct BillingInfoUseCase<B>
where
    B: BillingInfoRepository + Send + Sync + 'static,
{
    billing_info_repo: Arc<B>,
}

impl<B> BillingInfoUseCase<B>
where
    B: BillingInfoRepository + Send + Sync + 'static,
{
    pub fn new(billing_info_repo: Arc<B>) -> Self {
        Self { billing_info_repo }
    }

    pub async fn get(&self, user_id: Uuid) -> BillingInfoResult<BillingInfoDto> {
        self.billing_info_repo
            .find_by_user(user_id)
            .await
            .map_err(BillingInfoError::Internal)?
            .map(BillingInfoDto::from)
            .ok_or(BillingInfoError::NotFound)
    }

    /// Validates and stores a user's billing info. The tax number is
    /// normalized against the country before it is persisted; a bad one is
    /// reported on its field, not as a hard failure.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        payload: BillingInfoPayload,
    ) -> BillingInfoResult<BillingInfoDto> {
        let mut errors = match payload.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let tax_number = match payload.tax_number.as_deref() {
            Some(raw) => match clean_tax_number(raw, &payload.country) {
                Ok(cleaned) if cleaned.is_empty() => None,
                Ok(cleaned) => Some(cleaned),
                Err(error) => {
                    let mut field_error = ValidationError::new("tax_number");
                    field_error.message = Some(error.to_string().into());
                    errors.add("tax_number", field_error);
                    None
                }
            },
            None => None,
        };

        if !errors.is_empty() {
            return Err(BillingInfoError::Validation(errors));
        }

        let stored = self
            .billing_info_repo
            .upsert(InsertBillingInfoEntity {
                user_id,
                name: payload.name,
                street: payload.street,
                zipcode: payload.zipcode,
                city: payload.city,
                country: payload.country.to_uppercase(),
                tax_number,
                shipping_name: payload.shipping_name,
                shipping_street: payload.shipping_street,
                shipping_zipcode: payload.shipping_zipcode,
                shipping_city: payload.shipping_city,
            })
            .await
            .map_err(BillingInfoError::Internal)?;

        info!(%user_id, "billing_infos: billing info stored");
        Ok(BillingInfoDto::from(stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::billing_infos::BillingInfoEntity;
    use crate::domain::repositories::billing_infos::MockBillingInfoRepository;
    use chrono::Utc;

    fn payload(tax_number: Option<&str>) -> BillingInfoPayload {
        BillingInfoPayload {
            name: "Jan Kowalski".to_string(),
            street: "Polna 2".to_string(),
            zipcode: "00-002".to_string(),
            city: "Krakow".to_string(),
            country: "pl".to_string(),
            tax_number: tax_number.map(str::to_string),
            shipping_name: None,
            shipping_street: None,
            shipping_zipcode: None,
            shipping_city: None,
        }
    }

    fn stored_row(insert: &InsertBillingInfoEntity) -> BillingInfoEntity {
        let now = Utc::now();
        BillingInfoEntity {
            id: Uuid::new_v4(),
            user_id: insert.user_id,
            name: insert.name.clone(),
            street: insert.street.clone(),
            zipcode: insert.zipcode.clone(),
            city: insert.city.clone(),
            country: insert.country.clone(),
            tax_number: insert.tax_number.clone(),
            shipping_name: insert.shipping_name.clone(),
            shipping_street: insert.shipping_street.clone(),
            shipping_zipcode: insert.shipping_zipcode.clone(),
            shipping_city: insert.shipping_city.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn stores_a_normalized_tax_number() {
        let mut repo = MockBillingInfoRepository::new();
        repo.expect_upsert()
            .withf(|row| {
                row.country == "PL" && row.tax_number.as_deref() == Some("PL1234567890")
            })
            .returning(|row| {
                let stored = stored_row(&row);
                Box::pin(async move { Ok(stored) })
            });

        let usecase = BillingInfoUseCase::new(Arc::new(repo));
        let dto = usecase
            .upsert(Uuid::new_v4(), payload(Some("123-456-78-90")))
            .await
            .unwrap();

        assert_eq!(dto.tax_number.as_deref(), Some("PL1234567890"));
    }

    #[tokio::test]
    async fn a_bad_tax_number_lands_on_its_field() {
        let mut repo = MockBillingInfoRepository::new();
        repo.expect_upsert().never();

        let usecase = BillingInfoUseCase::new(Arc::new(repo));
        let error = usecase
            .upsert(Uuid::new_v4(), payload(Some("12345")))
            .await
            .unwrap_err();

        match &error {
            BillingInfoError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("tax_number"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(
            error.status_code(),
            axum::http::StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn a_blank_tax_number_is_stored_as_null() {
        let mut repo = MockBillingInfoRepository::new();
        repo.expect_upsert()
            .withf(|row| row.tax_number.is_none())
            .returning(|row| {
                let stored = stored_row(&row);
                Box::pin(async move { Ok(stored) })
            });

        let usecase = BillingInfoUseCase::new(Arc::new(repo));
        let dto = usecase
            .upsert(Uuid::new_v4(), payload(Some("  ")))
            .await
            .unwrap();

        assert!(dto.tax_number.is_none());
    }

    #[tokio::test]
    async fn empty_required_fields_are_field_errors() {
        let mut repo = MockBillingInfoRepository::new();
        repo.expect_upsert().never();

        let usecase = BillingInfoUseCase::new(Arc::new(repo));
        let mut bad = payload(None);
        bad.name = String::new();

        let error = usecase.upsert(Uuid::new_v4(), bad).await.unwrap_err();
        match error {
            BillingInfoError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("name"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
