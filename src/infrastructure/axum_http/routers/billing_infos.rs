use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use crate::application::usecases::billing_infos::{BillingInfoError, BillingInfoUseCase};
use crate::auth::AuthAdmin;
use crate::domain::repositories::billing_infos::BillingInfoRepository;
use crate::domain::value_objects::billing::BillingInfoPayload;
use crate::infrastructure::axum_http::error_responses::error_response;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::billing_infos::BillingInfoPostgres;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let billing_info_repository = BillingInfoPostgres::new(Arc::clone(&db_pool));
    let billing_info_usecase = BillingInfoUseCase::new(Arc::new(billing_info_repository));

    Router::new()
        .route("/:user_id", get(get_billing_info).put(upsert_billing_info))
        .with_state(Arc::new(billing_info_usecase))
}

pub async fn get_billing_info<B>(
    State(billing_info_usecase): State<Arc<BillingInfoUseCase<B>>>,
    _admin: AuthAdmin,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse
where
    B: BillingInfoRepository + Send + Sync + 'static,
{
    match billing_info_usecase.get(user_id).await {
        Ok(billing_info) => Json(billing_info).into_response(),
        Err(error) => error_response(error.status_code(), error.to_string()),
    }
}

pub async fn upsert_billing_info<B>(
    State(billing_info_usecase): State<Arc<BillingInfoUseCase<B>>>,
    _admin: AuthAdmin,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<BillingInfoPayload>,
) -> impl IntoResponse
where
    B: BillingInfoRepository + Send + Sync + 'static,
{
    match billing_info_usecase.upsert(user_id, payload).await {
        Ok(billing_info) => Json(billing_info).into_response(),
        // field-level errors go back keyed by field, not as a bare message
        Err(BillingInfoError::Validation(errors)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
        }
        Err(error) => error_response(error.status_code(), error.to_string()),
    }
}
