use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::application::usecases::orders::OrderUseCase;
use crate::auth::AuthAdmin;
use crate::config::config_model::DotEnvyConfig;
use crate::domain::repositories::{
    orders::OrderRepository, plans::PlanRepository, pricings::PricingRepository,
    user_plans::UserPlanRepository,
};
use crate::domain::value_objects::orders::{CreateOrderModel, OrderIdsModel, OrderListFilter};
use crate::infrastructure::axum_http::error_responses::error_response;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::{
    orders::OrderPostgres, plans::PlanPostgres, pricings::PricingPostgres,
    user_plans::UserPlanPostgres,
};

pub fn routes(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Router {
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let user_plan_repository = UserPlanPostgres::new(Arc::clone(&db_pool));
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let pricing_repository = PricingPostgres::new(Arc::clone(&db_pool));
    let order_usecase = OrderUseCase::new(
        Arc::new(order_repository),
        Arc::new(user_plan_repository),
        Arc::new(plan_repository),
        Arc::new(pricing_repository),
        config.billing.currency.clone(),
        config.billing.tax_rate_bp,
    );

    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/complete", post(complete_orders))
        .route("/return", post(return_orders))
        .route("/:order_id/cancel", post(cancel_order))
        .route("/:order_id/not-valid", post(mark_order_not_valid))
        .with_state(Arc::new(order_usecase))
}

pub async fn list_orders<O, U, P, Pr>(
    State(order_usecase): State<Arc<OrderUseCase<O, U, P, Pr>>>,
    _admin: AuthAdmin,
    Query(filter): Query<OrderListFilter>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pr: PricingRepository + Send + Sync + 'static,
{
    match order_usecase.list(filter).await {
        Ok(orders) => Json(orders).into_response(),
        Err(error) => error_response(error.status_code(), error.to_string()),
    }
}

pub async fn create_order<O, U, P, Pr>(
    State(order_usecase): State<Arc<OrderUseCase<O, U, P, Pr>>>,
    _admin: AuthAdmin,
    Json(create_order_model): Json<CreateOrderModel>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pr: PricingRepository + Send + Sync + 'static,
{
    match order_usecase.create_order(create_order_model).await {
        Ok(order_id) => (StatusCode::CREATED, Json(order_id)).into_response(),
        Err(error) => error_response(error.status_code(), error.to_string()),
    }
}

pub async fn complete_orders<O, U, P, Pr>(
    State(order_usecase): State<Arc<OrderUseCase<O, U, P, Pr>>>,
    _admin: AuthAdmin,
    Json(order_ids_model): Json<OrderIdsModel>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pr: PricingRepository + Send + Sync + 'static,
{
    let report = order_usecase
        .complete_orders(order_ids_model.order_ids)
        .await;
    Json(report).into_response()
}

pub async fn return_orders<O, U, P, Pr>(
    State(order_usecase): State<Arc<OrderUseCase<O, U, P, Pr>>>,
    _admin: AuthAdmin,
    Json(order_ids_model): Json<OrderIdsModel>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pr: PricingRepository + Send + Sync + 'static,
{
    let report = order_usecase.return_orders(order_ids_model.order_ids).await;
    Json(report).into_response()
}

pub async fn cancel_order<O, U, P, Pr>(
    State(order_usecase): State<Arc<OrderUseCase<O, U, P, Pr>>>,
    _admin: AuthAdmin,
    Path(order_id): Path<Uuid>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pr: PricingRepository + Send + Sync + 'static,
{
    match order_usecase.cancel_order(order_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error.status_code(), error.to_string()),
    }
}

pub async fn mark_order_not_valid<O, U, P, Pr>(
    State(order_usecase): State<Arc<OrderUseCase<O, U, P, Pr>>>,
    _admin: AuthAdmin,
    Path(order_id): Path<Uuid>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pr: PricingRepository + Send + Sync + 'static,
{
    match order_usecase.mark_not_valid(order_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error.status_code(), error.to_string()),
    }
}
