use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::events::{AccountRenewalEvent, RenewalPublisher};
use crate::domain::repositories::user_plans::UserPlanRepository;
use crate::domain::value_objects::batch::BatchReport;

#[derive(Debug, Error)]
pub enum RenewalError {
    #[error("user has no plan assigned")]
    UserPlanNotFound,
    #[error("automatic renewal is not configured for this user")]
    RenewalNotConfigured,
    #[error("renewal token has not been verified by a payment yet")]
    TokenNotVerified,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl RenewalError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            RenewalError::UserPlanNotFound => StatusCode::NOT_FOUND,
            RenewalError::RenewalNotConfigured | RenewalError::TokenNotVerified => {
                StatusCode::CONFLICT
            }
            RenewalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type RenewalResult<T> = std::result::Result<T, RenewalError>;

/// Announces renewal requests for users whose stored payment token has
/// been verified. Whoever charges the token listens on the bus; this
/// use-case only decides who qualifies and publishes.
pub struct RenewalUseCase<U, Pub>
where
    U: UserPlanRepository + Send + Sync + 'static,
    Pub: RenewalPublisher + Send + Sync + 'static,
{
    user_plan_repo: Arc<U>,
    publisher: Arc<Pub>,
}

impl<U, Pub> RenewalUseCase<U, Pub>
where
    U: UserPlanRepository + Send + Sync + 'static,
    Pub: RenewalPublisher + Send + Sync + 'static,
{
    pub fn new(user_plan_repo: Arc<U>, publisher: Arc<Pub>) -> Self {
        Self {
            user_plan_repo,
            publisher,
        }
    }

    pub async fn trigger_for_user(&self, user_id: Uuid) -> RenewalResult<()> {
        let (user_plan, recurring) = self
            .user_plan_repo
            .find_with_recurring(user_id)
            .await
            .map_err(RenewalError::Internal)?
            .ok_or(RenewalError::UserPlanNotFound)?;

        let recurring = recurring.ok_or(RenewalError::RenewalNotConfigured)?;
        if !recurring.token_verified {
            warn!(
                %user_id,
                "renewal: token not verified, skipping automatic renewal"
            );
            return Err(RenewalError::TokenNotVerified);
        }
        let token = recurring.token.ok_or(RenewalError::RenewalNotConfigured)?;

        self.publisher
            .publish(AccountRenewalEvent {
                user_id,
                user_plan_id: user_plan.id,
                pricing_id: recurring.pricing_id,
                payment_provider: recurring.payment_provider,
                token,
                occurred_at: Utc::now(),
            })
            .map_err(RenewalError::Internal)?;

        info!(%user_id, "renewal: automatic renewal requested");
        Ok(())
    }

    pub async fn trigger_for_users(&self, user_ids: Vec<Uuid>) -> BatchReport {
        let mut report = BatchReport::default();
        for user_id in user_ids {
            match self.trigger_for_user(user_id).await {
                Ok(()) => report.record_ok(user_id),
                Err(error) => report.record_err(user_id, &error),
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::MockRenewalPublisher;
    use crate::domain::entities::recurring_user_plans::RecurringUserPlanEntity;
    use crate::domain::entities::user_plans::UserPlanEntity;
    use crate::domain::repositories::user_plans::MockUserPlanRepository;
    use crate::domain::value_objects::enums::renewal_triggers::RenewalTriggeredBy;
    use mockall::predicate::eq;

    fn sample_user_plan(user_id: Uuid) -> UserPlanEntity {
        let now = Utc::now();
        UserPlanEntity {
            id: Uuid::new_v4(),
            user_id,
            plan_id: Uuid::new_v4(),
            expires_on: None,
            active: true,
            branches: 1,
            students: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_recurring(user_plan_id: Uuid, token_verified: bool) -> RecurringUserPlanEntity {
        let now = Utc::now();
        RecurringUserPlanEntity {
            id: Uuid::new_v4(),
            user_plan_id,
            pricing_id: Some(Uuid::new_v4()),
            token: Some("tok_123".to_string()),
            payment_provider: Some("stripe".to_string()),
            amount_minor: Some(9_900),
            tax_rate_bp: Some(2_300),
            currency: Some("EUR".to_string()),
            renewal_triggered_by: RenewalTriggeredBy::Task.to_string(),
            token_verified,
            card_expire_year: None,
            card_expire_month: None,
            card_masked_number: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn publishes_for_a_verified_token() {
        let user_id = Uuid::new_v4();
        let user_plan = sample_user_plan(user_id);
        let user_plan_id = user_plan.id;
        let recurring = sample_recurring(user_plan_id, true);

        let mut user_plan_repo = MockUserPlanRepository::new();
        let mut publisher = MockRenewalPublisher::new();

        user_plan_repo
            .expect_find_with_recurring()
            .with(eq(user_id))
            .returning(move |_| {
                let pair = (user_plan.clone(), Some(recurring.clone()));
                Box::pin(async move { Ok(Some(pair)) })
            });
        publisher
            .expect_publish()
            .withf(move |event| {
                event.user_id == user_id
                    && event.user_plan_id == user_plan_id
                    && event.token == "tok_123"
                    && event.payment_provider.as_deref() == Some("stripe")
            })
            .returning(|_| Ok(()));

        let usecase = RenewalUseCase::new(Arc::new(user_plan_repo), Arc::new(publisher));
        usecase.trigger_for_user(user_id).await.unwrap();
    }

    #[tokio::test]
    async fn an_unverified_token_publishes_nothing() {
        let user_id = Uuid::new_v4();
        let user_plan = sample_user_plan(user_id);
        let recurring = sample_recurring(user_plan.id, false);

        let mut user_plan_repo = MockUserPlanRepository::new();
        let mut publisher = MockRenewalPublisher::new();

        user_plan_repo
            .expect_find_with_recurring()
            .returning(move |_| {
                let pair = (user_plan.clone(), Some(recurring.clone()));
                Box::pin(async move { Ok(Some(pair)) })
            });
        publisher.expect_publish().never();

        let usecase = RenewalUseCase::new(Arc::new(user_plan_repo), Arc::new(publisher));
        let error = usecase.trigger_for_user(user_id).await.unwrap_err();

        assert!(matches!(error, RenewalError::TokenNotVerified));
    }

    #[tokio::test]
    async fn missing_recurring_state_is_reported() {
        let user_id = Uuid::new_v4();
        let user_plan = sample_user_plan(user_id);

        let mut user_plan_repo = MockUserPlanRepository::new();
        user_plan_repo
            .expect_find_with_recurring()
            .returning(move |_| {
                let pair = (user_plan.clone(), None);
                Box::pin(async move { Ok(Some(pair)) })
            });

        let usecase = RenewalUseCase::new(
            Arc::new(user_plan_repo),
            Arc::new(MockRenewalPublisher::new()),
        );
        let error = usecase.trigger_for_user(user_id).await.unwrap_err();

        assert!(matches!(error, RenewalError::RenewalNotConfigured));
    }

    #[tokio::test]
    async fn bulk_trigger_reports_each_user() {
        let verified_user = Uuid::new_v4();
        let unverified_user = Uuid::new_v4();

        let verified_plan = sample_user_plan(verified_user);
        let verified_recurring = sample_recurring(verified_plan.id, true);
        let unverified_plan = sample_user_plan(unverified_user);
        let unverified_recurring = sample_recurring(unverified_plan.id, false);

        let mut user_plan_repo = MockUserPlanRepository::new();
        let mut publisher = MockRenewalPublisher::new();

        user_plan_repo
            .expect_find_with_recurring()
            .returning(move |user_id| {
                let pair = if user_id == verified_user {
                    Some((verified_plan.clone(), Some(verified_recurring.clone())))
                } else if user_id == unverified_user {
                    Some((unverified_plan.clone(), Some(unverified_recurring.clone())))
                } else {
                    None
                };
                Box::pin(async move { Ok(pair) })
            });
        publisher
            .expect_publish()
            .times(1)
            .returning(|_| Ok(()));

        let usecase = RenewalUseCase::new(Arc::new(user_plan_repo), Arc::new(publisher));
        let report = usecase
            .trigger_for_users(vec![verified_user, unverified_user, Uuid::new_v4()])
            .await;

        assert_eq!(report.completed, 1);
        assert_eq!(report.failed, 2);
    }
}
