use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::application::usecases::plans::PlanAdminUseCase;
use crate::auth::AuthAdmin;
use crate::domain::repositories::plans::PlanRepository;
use crate::domain::value_objects::plans::{PlanIdsModel, PlanListFilter};
use crate::infrastructure::axum_http::error_responses::error_response;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::plans::PlanPostgres;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let plan_usecase = PlanAdminUseCase::new(Arc::new(plan_repository));

    Router::new()
        .route("/", get(list_plans))
        .route("/copy", post(copy_plans))
        .route("/:plan_id/quotas", get(plan_quota_map))
        .with_state(Arc::new(plan_usecase))
}

pub async fn list_plans<P>(
    State(plan_usecase): State<Arc<PlanAdminUseCase<P>>>,
    _admin: AuthAdmin,
    Query(filter): Query<PlanListFilter>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
{
    match plan_usecase.list(filter).await {
        Ok(plans) => Json(plans).into_response(),
        Err(error) => error_response(error.status_code(), error.to_string()),
    }
}

pub async fn copy_plans<P>(
    State(plan_usecase): State<Arc<PlanAdminUseCase<P>>>,
    _admin: AuthAdmin,
    Json(plan_ids_model): Json<PlanIdsModel>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
{
    let report = plan_usecase.copy_plans(plan_ids_model.plan_ids).await;
    Json(report).into_response()
}

pub async fn plan_quota_map<P>(
    State(plan_usecase): State<Arc<PlanAdminUseCase<P>>>,
    _admin: AuthAdmin,
    Path(plan_id): Path<Uuid>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
{
    match plan_usecase.quota_map(plan_id).await {
        Ok(quota_map) => Json(quota_map).into_response(),
        Err(error) => error_response(error.status_code(), error.to_string()),
    }
}
