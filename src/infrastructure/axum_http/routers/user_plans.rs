use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use uuid::Uuid;

use crate::application::events::{RenewalEventBus, RenewalPublisher};
use crate::application::usecases::renewal::RenewalUseCase;
use crate::application::usecases::user_plans::UserPlanUseCase;
use crate::auth::AuthAdmin;
use crate::domain::repositories::{plans::PlanRepository, user_plans::UserPlanRepository};
use crate::domain::value_objects::user_plans::{UserIdsModel, UserPlanListFilter};
use crate::infrastructure::axum_http::error_responses::error_response;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::{
    plans::PlanPostgres, user_plans::UserPlanPostgres,
};

pub struct UserPlanRouterState<U, P, Pub>
where
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pub: RenewalPublisher + Send + Sync + 'static,
{
    pub user_plan_usecase: UserPlanUseCase<U, P>,
    pub renewal_usecase: RenewalUseCase<U, Pub>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>, renewal_bus: RenewalEventBus) -> Router {
    let user_plan_repository = Arc::new(UserPlanPostgres::new(Arc::clone(&db_pool)));
    let plan_repository = Arc::new(PlanPostgres::new(Arc::clone(&db_pool)));
    let state = UserPlanRouterState {
        user_plan_usecase: UserPlanUseCase::new(
            Arc::clone(&user_plan_repository),
            plan_repository,
        ),
        renewal_usecase: RenewalUseCase::new(user_plan_repository, Arc::new(renewal_bus)),
    };

    Router::new()
        .route("/", get(list_user_plans))
        .route("/:user_id/quotas", get(user_quota_map))
        .route("/autorenew", post(trigger_autorenew))
        .route("/deactivate-expired", post(deactivate_expired))
        .with_state(Arc::new(state))
}

pub async fn list_user_plans<U, P, Pub>(
    State(state): State<Arc<UserPlanRouterState<U, P, Pub>>>,
    _admin: AuthAdmin,
    Query(filter): Query<UserPlanListFilter>,
) -> impl IntoResponse
where
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pub: RenewalPublisher + Send + Sync + 'static,
{
    match state.user_plan_usecase.list(filter).await {
        Ok(user_plans) => Json(user_plans).into_response(),
        Err(error) => error_response(error.status_code(), error.to_string()),
    }
}

pub async fn user_quota_map<U, P, Pub>(
    State(state): State<Arc<UserPlanRouterState<U, P, Pub>>>,
    _admin: AuthAdmin,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse
where
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pub: RenewalPublisher + Send + Sync + 'static,
{
    match state.user_plan_usecase.quota_map(user_id).await {
        Ok(quota_map) => Json(quota_map).into_response(),
        Err(error) => error_response(error.status_code(), error.to_string()),
    }
}

pub async fn trigger_autorenew<U, P, Pub>(
    State(state): State<Arc<UserPlanRouterState<U, P, Pub>>>,
    _admin: AuthAdmin,
    Json(user_ids_model): Json<UserIdsModel>,
) -> impl IntoResponse
where
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pub: RenewalPublisher + Send + Sync + 'static,
{
    let report = state
        .renewal_usecase
        .trigger_for_users(user_ids_model.user_ids)
        .await;
    Json(report).into_response()
}

pub async fn deactivate_expired<U, P, Pub>(
    State(state): State<Arc<UserPlanRouterState<U, P, Pub>>>,
    _admin: AuthAdmin,
) -> impl IntoResponse
where
    U: UserPlanRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pub: RenewalPublisher + Send + Sync + 'static,
{
    match state.user_plan_usecase.deactivate_expired().await {
        Ok(affected) => Json(json!({ "deactivated": affected })).into_response(),
        Err(error) => error_response(error.status_code(), error.to_string()),
    }
}
