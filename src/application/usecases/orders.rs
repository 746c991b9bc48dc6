use std::sync::Arc;

use anyhow::anyhow;
use chrono::{Duration, NaiveDate, Utc};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::orders::{InsertOrderEntity, OrderEntity};
use crate::domain::entities::user_plans::UserPlanEntity;
use crate::domain::repositories::{
    orders::OrderRepository, plans::PlanRepository, pricings::PricingRepository,
    user_plans::UserPlanRepository,
};
use crate::domain::value_objects::batch::BatchReport;
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::orders::{
    CreateOrderModel, OrderCompletionPatch, OrderDto, OrderListFilter, OrderReturnPatch,
    UserPlanUpsert,
};

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order not found")]
    OrderNotFound,
    #[error("order is {actual}, cannot transition to {requested}")]
    InvalidTransition {
        actual: OrderStatus,
        requested: OrderStatus,
    },
    #[error("plan has no price for the requested period")]
    MissingPlanPricing,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl OrderError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            OrderError::OrderNotFound => StatusCode::NOT_FOUND,
            OrderError::InvalidTransition { .. } => StatusCode::CONFLICT,
            OrderError::MissingPlanPricing => StatusCode::BAD_REQUEST,
            OrderError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type OrderResult<T> = std::result::Result<T, OrderError>;

/// Expiry window applied to the user plan by a completion. `expires_on`
/// is the value the user plan ends up with, which the recorded window
/// does not always equal (a never-expiring plan records no window).
#[derive(Debug, Clone, Copy, PartialEq)]
struct ExtensionWindow {
    from: Option<NaiveDate>,
    until: Option<NaiveDate>,
    expires_on: Option<NaiveDate>,
}

/// Where the paid period lands on the user's current plan state:
/// extending an unexpired assignment of the same plan starts at its
/// current expiry, anything else starts today. A plan without a dated
/// expiry never expires and is left alone; an order without a pricing
/// only switches the plan.
fn extension_window(
    user_plan: Option<&UserPlanEntity>,
    plan_id: Uuid,
    period_days: Option<i32>,
    today: NaiveDate,
) -> ExtensionWindow {
    let existing = user_plan.and_then(|up| up.expires_on);
    let period_days = match period_days {
        Some(period_days) => period_days,
        None => {
            return ExtensionWindow {
                from: None,
                until: None,
                expires_on: existing,
            };
        }
    };

    let same_plan = user_plan
        .map(|up| up.plan_id == plan_id)
        .unwrap_or(false);

    if same_plan && existing.is_none() {
        return ExtensionWindow {
            from: None,
            until: None,
            expires_on: None,
        };
    }

    let from = match existing {
        Some(expires_on) if same_plan && expires_on >= today => expires_on,
        _ => today,
    };
    let until = from + Duration::days(period_days.into());

    ExtensionWindow {
        from: Some(from),
        until: Some(until),
        expires_on: Some(until),
    }
}

pub struct OrderUseCase<O, U, P, Pr>
where
    O: OrderRepository + Send + Sync + 'static,
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pr: PricingRepository + Send + Sync + 'static,
{
    order_repo: Arc<O>,
    user_plan_repo: Arc<U>,
    plan_repo: Arc<P>,
    pricing_repo: Arc<Pr>,
    currency: String,
    tax_rate_bp: Option<i32>,
}

impl<O, U, P, Pr> OrderUseCase<O, U, P, Pr>
where
    O: OrderRepository + Send + Sync + 'static,
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pr: PricingRepository + Send + Sync + 'static,
{
    pub fn new(
        order_repo: Arc<O>,
        user_plan_repo: Arc<U>,
        plan_repo: Arc<P>,
        pricing_repo: Arc<Pr>,
        currency: String,
        tax_rate_bp: Option<i32>,
    ) -> Self {
        Self {
            order_repo,
            user_plan_repo,
            plan_repo,
            pricing_repo,
            currency,
            tax_rate_bp,
        }
    }

    pub async fn list(&self, filter: OrderListFilter) -> OrderResult<Vec<OrderDto>> {
        let orders = self
            .order_repo
            .list(filter)
            .await
            .map_err(OrderError::Internal)?;
        Ok(orders.into_iter().map(OrderDto::from).collect())
    }

    pub async fn create_order(&self, model: CreateOrderModel) -> OrderResult<Uuid> {
        info!(
            user_id = %model.user_id,
            plan_id = %model.plan_id,
            pricing_id = ?model.pricing_id,
            "orders: creating order"
        );

        let amount_minor = match model.pricing_id {
            Some(pricing_id) => {
                let plan_pricing = self
                    .plan_repo
                    .find_plan_pricing(model.plan_id, pricing_id)
                    .await
                    .map_err(OrderError::Internal)?
                    .ok_or_else(|| {
                        warn!(
                            plan_id = %model.plan_id,
                            %pricing_id,
                            "orders: no price attached to plan for this period"
                        );
                        OrderError::MissingPlanPricing
                    })?;
                plan_pricing.price_minor
            }
            // A plan change without a billing period costs nothing.
            None => 0,
        };

        let order_id = self
            .order_repo
            .create(InsertOrderEntity {
                user_id: model.user_id,
                plan_id: model.plan_id,
                pricing_id: model.pricing_id,
                flat_name: model.flat_name,
                amount_minor,
                tax_rate_bp: self.tax_rate_bp,
                currency: self.currency.clone(),
                status: OrderStatus::New.to_string(),
            })
            .await
            .map_err(OrderError::Internal)?;

        info!(%order_id, "orders: order created");
        Ok(order_id)
    }

    /// Completes a new order: stamps the completion, extends (or switches)
    /// the user's plan, and records the applied window on the order. The
    /// status flip and the user-plan mutation commit together or not at
    /// all.
    pub async fn complete_order(&self, order_id: Uuid) -> OrderResult<()> {
        let order = self.load(order_id).await?;
        let status = Self::parse_status(&order)?;
        if status != OrderStatus::New {
            warn!(
                %order_id,
                actual = %status,
                "orders: refusing to complete a non-new order"
            );
            return Err(OrderError::InvalidTransition {
                actual: status,
                requested: OrderStatus::Completed,
            });
        }

        let user_plan = self
            .user_plan_repo
            .find_by_user(order.user_id)
            .await
            .map_err(OrderError::Internal)?;

        let period_days = match order.pricing_id {
            Some(pricing_id) => {
                let pricing = self
                    .pricing_repo
                    .find_by_id(pricing_id)
                    .await
                    .map_err(OrderError::Internal)?
                    .ok_or_else(|| {
                        OrderError::Internal(anyhow!("pricing {pricing_id} is gone"))
                    })?;
                Some(pricing.period_days)
            }
            None => None,
        };

        let today = Utc::now().date_naive();
        let window = extension_window(user_plan.as_ref(), order.plan_id, period_days, today);

        let patch = OrderCompletionPatch {
            completed_at: Utc::now(),
            plan_extended_from: window.from,
            plan_extended_until: window.until,
            user_plan: UserPlanUpsert {
                user_id: order.user_id,
                plan_id: order.plan_id,
                expires_on: window.expires_on,
                active: true,
            },
        };

        let applied = self
            .order_repo
            .apply_completion(order_id, patch)
            .await
            .map_err(OrderError::Internal)?;
        if !applied {
            return Err(self
                .transition_conflict(order_id, OrderStatus::Completed)
                .await);
        }

        info!(
            %order_id,
            user_id = %order.user_id,
            plan_id = %order.plan_id,
            plan_extended_until = ?window.until,
            "orders: order completed"
        );
        Ok(())
    }

    /// Returns a completed order, shrinking the user plan's expiry by the
    /// window the completion recorded.
    pub async fn return_order(&self, order_id: Uuid) -> OrderResult<()> {
        let order = self.load(order_id).await?;
        let status = Self::parse_status(&order)?;
        if status != OrderStatus::Completed {
            warn!(
                %order_id,
                actual = %status,
                "orders: refusing to return a non-completed order"
            );
            return Err(OrderError::InvalidTransition {
                actual: status,
                requested: OrderStatus::Returned,
            });
        }

        let user_plan = self
            .user_plan_repo
            .find_by_user(order.user_id)
            .await
            .map_err(OrderError::Internal)?;

        let revert_expires_on_to = match (
            order.plan_extended_from,
            order.plan_extended_until,
            user_plan.as_ref().and_then(|up| up.expires_on),
        ) {
            (Some(from), Some(until), Some(expires_on)) => {
                let granted_days = until.signed_duration_since(from).num_days();
                Some(expires_on - Duration::days(granted_days))
            }
            // Nothing was extended, or the plan never expires.
            _ => None,
        };

        let applied = self
            .order_repo
            .apply_return(
                order_id,
                OrderReturnPatch {
                    user_id: order.user_id,
                    revert_expires_on_to,
                },
            )
            .await
            .map_err(OrderError::Internal)?;
        if !applied {
            return Err(self
                .transition_conflict(order_id, OrderStatus::Returned)
                .await);
        }

        info!(
            %order_id,
            user_id = %order.user_id,
            reverted_to = ?revert_expires_on_to,
            "orders: order returned"
        );
        Ok(())
    }

    pub async fn cancel_order(&self, order_id: Uuid) -> OrderResult<()> {
        self.close_from_new(order_id, OrderStatus::Canceled).await
    }

    pub async fn mark_not_valid(&self, order_id: Uuid) -> OrderResult<()> {
        self.close_from_new(order_id, OrderStatus::NotValid).await
    }

    pub async fn complete_orders(&self, order_ids: Vec<Uuid>) -> BatchReport {
        let mut report = BatchReport::default();
        for order_id in order_ids {
            match self.complete_order(order_id).await {
                Ok(()) => report.record_ok(order_id),
                Err(error) => report.record_err(order_id, &error),
            }
        }
        report
    }

    pub async fn return_orders(&self, order_ids: Vec<Uuid>) -> BatchReport {
        let mut report = BatchReport::default();
        for order_id in order_ids {
            match self.return_order(order_id).await {
                Ok(()) => report.record_ok(order_id),
                Err(error) => report.record_err(order_id, &error),
            }
        }
        report
    }

    async fn close_from_new(&self, order_id: Uuid, requested: OrderStatus) -> OrderResult<()> {
        let order = self.load(order_id).await?;
        let status = Self::parse_status(&order)?;
        if !status.can_transition_to(requested) {
            return Err(OrderError::InvalidTransition {
                actual: status,
                requested,
            });
        }

        let applied = self
            .order_repo
            .set_status_from_new(order_id, requested)
            .await
            .map_err(OrderError::Internal)?;
        if !applied {
            return Err(self.transition_conflict(order_id, requested).await);
        }

        info!(%order_id, status = %requested, "orders: order closed");
        Ok(())
    }

    async fn load(&self, order_id: Uuid) -> OrderResult<OrderEntity> {
        self.order_repo
            .find_by_id(order_id)
            .await
            .map_err(OrderError::Internal)?
            .ok_or(OrderError::OrderNotFound)
    }

    /// The guard lost a race; report what the order looks like now.
    async fn transition_conflict(&self, order_id: Uuid, requested: OrderStatus) -> OrderError {
        let actual = match self.order_repo.find_by_id(order_id).await {
            Ok(Some(order)) => Self::parse_status(&order).ok(),
            _ => None,
        };
        OrderError::InvalidTransition {
            actual: actual.unwrap_or(requested),
            requested,
        }
    }

    fn parse_status(order: &OrderEntity) -> OrderResult<OrderStatus> {
        OrderStatus::from_str(&order.status).ok_or_else(|| {
            OrderError::Internal(anyhow!("unrecognized order status: {}", order.status))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::orders::MockOrderRepository;
    use crate::domain::repositories::plans::MockPlanRepository;
    use crate::domain::repositories::pricings::MockPricingRepository;
    use crate::domain::repositories::user_plans::MockUserPlanRepository;
    use crate::domain::entities::pricings::PricingEntity;
    use mockall::predicate::eq;

    fn sample_order(status: OrderStatus, pricing_id: Option<Uuid>) -> OrderEntity {
        let now = Utc::now();
        OrderEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            pricing_id,
            flat_name: None,
            amount_minor: 9_900,
            tax_rate_bp: Some(2_300),
            currency: "EUR".to_string(),
            status: status.to_string(),
            completed_at: None,
            plan_extended_from: None,
            plan_extended_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_user_plan(
        user_id: Uuid,
        plan_id: Uuid,
        expires_on: Option<NaiveDate>,
    ) -> UserPlanEntity {
        let now = Utc::now();
        UserPlanEntity {
            id: Uuid::new_v4(),
            user_id,
            plan_id,
            expires_on,
            active: true,
            branches: 1,
            students: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_pricing(pricing_id: Uuid, period_days: i32) -> PricingEntity {
        let now = Utc::now();
        PricingEntity {
            id: pricing_id,
            name: "monthly".to_string(),
            period_days,
            created_at: now,
            updated_at: now,
        }
    }

    fn usecase(
        order_repo: MockOrderRepository,
        user_plan_repo: MockUserPlanRepository,
        plan_repo: MockPlanRepository,
        pricing_repo: MockPricingRepository,
    ) -> OrderUseCase<
        MockOrderRepository,
        MockUserPlanRepository,
        MockPlanRepository,
        MockPricingRepository,
    > {
        OrderUseCase::new(
            Arc::new(order_repo),
            Arc::new(user_plan_repo),
            Arc::new(plan_repo),
            Arc::new(pricing_repo),
            "EUR".to_string(),
            Some(2_300),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_extends_an_unexpired_same_plan_from_its_expiry() {
        let plan_id = Uuid::new_v4();
        let today = date(2026, 8, 6);
        let user_plan = sample_user_plan(Uuid::new_v4(), plan_id, Some(date(2026, 9, 1)));

        let window = extension_window(Some(&user_plan), plan_id, Some(30), today);

        assert_eq!(window.from, Some(date(2026, 9, 1)));
        assert_eq!(window.until, Some(date(2026, 10, 1)));
        assert_eq!(window.expires_on, Some(date(2026, 10, 1)));
    }

    #[test]
    fn window_restarts_today_for_an_expired_or_different_plan() {
        let plan_id = Uuid::new_v4();
        let today = date(2026, 8, 6);

        let expired = sample_user_plan(Uuid::new_v4(), plan_id, Some(date(2026, 8, 1)));
        let window = extension_window(Some(&expired), plan_id, Some(30), today);
        assert_eq!(window.from, Some(today));
        assert_eq!(window.until, Some(date(2026, 9, 5)));

        let other_plan =
            sample_user_plan(Uuid::new_v4(), Uuid::new_v4(), Some(date(2026, 12, 1)));
        let window = extension_window(Some(&other_plan), plan_id, Some(30), today);
        assert_eq!(window.from, Some(today));

        let window = extension_window(None, plan_id, Some(30), today);
        assert_eq!(window.from, Some(today));
        assert_eq!(window.expires_on, Some(date(2026, 9, 5)));
    }

    #[test]
    fn window_leaves_a_never_expiring_same_plan_alone() {
        let plan_id = Uuid::new_v4();
        let today = date(2026, 8, 6);
        let user_plan = sample_user_plan(Uuid::new_v4(), plan_id, None);

        let window = extension_window(Some(&user_plan), plan_id, Some(30), today);

        assert_eq!(window.from, None);
        assert_eq!(window.until, None);
        assert_eq!(window.expires_on, None);
    }

    #[test]
    fn window_without_a_period_only_switches_the_plan() {
        let today = date(2026, 8, 6);
        let user_plan =
            sample_user_plan(Uuid::new_v4(), Uuid::new_v4(), Some(date(2026, 9, 1)));

        let window = extension_window(Some(&user_plan), Uuid::new_v4(), None, today);

        assert_eq!(window.from, None);
        assert_eq!(window.until, None);
        assert_eq!(window.expires_on, Some(date(2026, 9, 1)));
    }

    #[tokio::test]
    async fn completing_a_new_order_applies_the_extension() {
        let pricing_id = Uuid::new_v4();
        let order = sample_order(OrderStatus::New, Some(pricing_id));
        let order_id = order.id;
        let user_id = order.user_id;
        let plan_id = order.plan_id;
        // far-future expiry keeps the expected window independent of the clock
        let expires_on = date(2300, 1, 1);
        let user_plan = sample_user_plan(user_id, plan_id, Some(expires_on));

        let mut order_repo = MockOrderRepository::new();
        let mut user_plan_repo = MockUserPlanRepository::new();
        let plan_repo = MockPlanRepository::new();
        let mut pricing_repo = MockPricingRepository::new();

        order_repo
            .expect_find_by_id()
            .with(eq(order_id))
            .returning(move |_| {
                let order = order.clone();
                Box::pin(async move { Ok(Some(order)) })
            });
        user_plan_repo
            .expect_find_by_user()
            .with(eq(user_id))
            .returning(move |_| {
                let user_plan = user_plan.clone();
                Box::pin(async move { Ok(Some(user_plan)) })
            });
        pricing_repo
            .expect_find_by_id()
            .with(eq(pricing_id))
            .returning(move |_| {
                let pricing = sample_pricing(pricing_id, 30);
                Box::pin(async move { Ok(Some(pricing)) })
            });
        order_repo
            .expect_apply_completion()
            .withf(move |id, patch| {
                *id == order_id
                    && patch.plan_extended_from == Some(expires_on)
                    && patch.plan_extended_until == Some(date(2300, 1, 31))
                    && patch.user_plan
                        == UserPlanUpsert {
                            user_id,
                            plan_id,
                            expires_on: Some(date(2300, 1, 31)),
                            active: true,
                        }
            })
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let usecase = usecase(order_repo, user_plan_repo, plan_repo, pricing_repo);
        usecase.complete_order(order_id).await.unwrap();
    }

    #[tokio::test]
    async fn completing_a_completed_order_is_a_conflict() {
        let order = sample_order(OrderStatus::Completed, None);
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });
        order_repo.expect_apply_completion().never();

        let usecase = usecase(
            order_repo,
            MockUserPlanRepository::new(),
            MockPlanRepository::new(),
            MockPricingRepository::new(),
        );

        let error = usecase.complete_order(order_id).await.unwrap_err();
        assert!(matches!(
            error,
            OrderError::InvalidTransition {
                actual: OrderStatus::Completed,
                requested: OrderStatus::Completed,
            }
        ));
        assert_eq!(error.status_code(), axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn losing_the_completion_race_is_a_conflict() {
        let order = sample_order(OrderStatus::New, None);
        let order_id = order.id;
        let user_id = order.user_id;

        let mut order_repo = MockOrderRepository::new();
        let mut user_plan_repo = MockUserPlanRepository::new();

        let mut raced = order.clone();
        raced.status = OrderStatus::Canceled.to_string();
        let mut responses = vec![Some(raced), Some(order)];
        order_repo
            .expect_find_by_id()
            .times(2)
            .returning(move |_| {
                let response = responses.pop().flatten();
                Box::pin(async move { Ok(response) })
            });
        user_plan_repo
            .expect_find_by_user()
            .with(eq(user_id))
            .returning(|_| Box::pin(async { Ok(None) }));
        order_repo
            .expect_apply_completion()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        let usecase = usecase(
            order_repo,
            user_plan_repo,
            MockPlanRepository::new(),
            MockPricingRepository::new(),
        );

        let error = usecase.complete_order(order_id).await.unwrap_err();
        assert!(matches!(
            error,
            OrderError::InvalidTransition {
                actual: OrderStatus::Canceled,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn returning_a_completed_order_reverts_the_window() {
        let mut order = sample_order(OrderStatus::Completed, Some(Uuid::new_v4()));
        order.plan_extended_from = Some(date(2026, 9, 1));
        order.plan_extended_until = Some(date(2026, 10, 1));
        let order_id = order.id;
        let user_id = order.user_id;
        let user_plan = sample_user_plan(user_id, order.plan_id, Some(date(2026, 10, 1)));

        let mut order_repo = MockOrderRepository::new();
        let mut user_plan_repo = MockUserPlanRepository::new();

        order_repo.expect_find_by_id().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });
        user_plan_repo
            .expect_find_by_user()
            .with(eq(user_id))
            .returning(move |_| {
                let user_plan = user_plan.clone();
                Box::pin(async move { Ok(Some(user_plan)) })
            });
        order_repo
            .expect_apply_return()
            .withf(move |id, patch| {
                *id == order_id
                    && *patch
                        == OrderReturnPatch {
                            user_id,
                            revert_expires_on_to: Some(date(2026, 9, 1)),
                        }
            })
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let usecase = usecase(
            order_repo,
            user_plan_repo,
            MockPlanRepository::new(),
            MockPricingRepository::new(),
        );
        usecase.return_order(order_id).await.unwrap();
    }

    #[tokio::test]
    async fn returning_a_new_order_is_a_conflict() {
        let order = sample_order(OrderStatus::New, None);
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });
        order_repo.expect_apply_return().never();

        let usecase = usecase(
            order_repo,
            MockUserPlanRepository::new(),
            MockPlanRepository::new(),
            MockPricingRepository::new(),
        );

        let error = usecase.return_order(order_id).await.unwrap_err();
        assert_eq!(error.status_code(), axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn bulk_completion_reports_each_order_separately() {
        let good = sample_order(OrderStatus::New, None);
        let bad = sample_order(OrderStatus::Returned, None);
        let good_id = good.id;
        let bad_id = bad.id;
        let user_id = good.user_id;

        let mut order_repo = MockOrderRepository::new();
        let mut user_plan_repo = MockUserPlanRepository::new();

        order_repo.expect_find_by_id().returning(move |id| {
            let response = if id == good_id {
                Some(good.clone())
            } else if id == bad_id {
                Some(bad.clone())
            } else {
                None
            };
            Box::pin(async move { Ok(response) })
        });
        user_plan_repo
            .expect_find_by_user()
            .with(eq(user_id))
            .returning(|_| Box::pin(async { Ok(None) }));
        order_repo
            .expect_apply_completion()
            .withf(move |id, _| *id == good_id)
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let usecase = usecase(
            order_repo,
            user_plan_repo,
            MockPlanRepository::new(),
            MockPricingRepository::new(),
        );

        let missing_id = Uuid::new_v4();
        let report = usecase
            .complete_orders(vec![good_id, bad_id, missing_id])
            .await;

        assert_eq!(report.completed, 1);
        assert_eq!(report.failed, 2);
        assert_eq!(report.results.len(), 3);
        assert!(report.results[0].ok);
        assert!(!report.results[1].ok);
        assert!(!report.results[2].ok);
    }

    #[tokio::test]
    async fn creating_an_order_prices_it_from_the_plan_pricing() {
        let plan_id = Uuid::new_v4();
        let pricing_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut order_repo = MockOrderRepository::new();
        let mut plan_repo = MockPlanRepository::new();

        plan_repo
            .expect_find_plan_pricing()
            .with(eq(plan_id), eq(pricing_id))
            .returning(move |plan_id, pricing_id| {
                let plan_pricing = crate::domain::entities::plan_pricings::PlanPricingEntity {
                    id: Uuid::new_v4(),
                    plan_id,
                    pricing_id,
                    price_minor: 9_900,
                    regular_price_minor: None,
                    has_automatic_renewal: true,
                    visible: true,
                    position: 0,
                };
                Box::pin(async move { Ok(Some(plan_pricing)) })
            });
        order_repo
            .expect_create()
            .withf(|insert| {
                insert.amount_minor == 9_900
                    && insert.status == "new"
                    && insert.currency == "EUR"
                    && insert.tax_rate_bp == Some(2_300)
            })
            .returning(|_| Box::pin(async { Ok(Uuid::new_v4()) }));

        let usecase = usecase(
            order_repo,
            MockUserPlanRepository::new(),
            plan_repo,
            MockPricingRepository::new(),
        );

        usecase
            .create_order(CreateOrderModel {
                user_id,
                plan_id,
                pricing_id: Some(pricing_id),
                flat_name: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn creating_an_order_without_a_price_is_rejected() {
        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_plan_pricing()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = usecase(
            MockOrderRepository::new(),
            MockUserPlanRepository::new(),
            plan_repo,
            MockPricingRepository::new(),
        );

        let error = usecase
            .create_order(CreateOrderModel {
                user_id: Uuid::new_v4(),
                plan_id: Uuid::new_v4(),
                pricing_id: Some(Uuid::new_v4()),
                flat_name: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(error, OrderError::MissingPlanPricing));
        assert_eq!(error.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
