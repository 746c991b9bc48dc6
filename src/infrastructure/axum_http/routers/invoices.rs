use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
};

use crate::application::usecases::invoicing::InvoicingUseCase;
use crate::auth::AuthAdmin;
use crate::config::config_model::DotEnvyConfig;
use crate::domain::repositories::{
    billing_infos::BillingInfoRepository, invoices::InvoiceRepository, orders::OrderRepository,
};
use crate::domain::value_objects::invoices::{
    GenerateInvoicesModel, InvoiceListFilter, IssuerInfo,
};
use crate::infrastructure::axum_http::error_responses::error_response;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::{
    billing_infos::BillingInfoPostgres, invoices::InvoicePostgres, orders::OrderPostgres,
};

pub fn routes(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Router {
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let invoice_repository = InvoicePostgres::new(Arc::clone(&db_pool));
    let billing_info_repository = BillingInfoPostgres::new(Arc::clone(&db_pool));
    let issuer = IssuerInfo {
        name: config.billing.issuer.name.clone(),
        street: config.billing.issuer.street.clone(),
        zipcode: config.billing.issuer.zipcode.clone(),
        city: config.billing.issuer.city.clone(),
        country: config.billing.issuer.country.clone(),
        tax_number: config.billing.issuer.tax_number.clone(),
    };
    let invoicing_usecase = InvoicingUseCase::new(
        Arc::new(order_repository),
        Arc::new(invoice_repository),
        Arc::new(billing_info_repository),
        issuer,
        config.billing.payment_grace_days,
    );

    Router::new()
        .route("/", get(list_invoices))
        .route("/generate", post(generate_invoices))
        .with_state(Arc::new(invoicing_usecase))
}

pub async fn list_invoices<O, I, B>(
    State(invoicing_usecase): State<Arc<InvoicingUseCase<O, I, B>>>,
    _admin: AuthAdmin,
    Query(filter): Query<InvoiceListFilter>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    B: BillingInfoRepository + Send + Sync + 'static,
{
    match invoicing_usecase.list(filter).await {
        Ok(invoices) => Json(invoices).into_response(),
        Err(error) => error_response(error.status_code(), error.to_string()),
    }
}

pub async fn generate_invoices<O, I, B>(
    State(invoicing_usecase): State<Arc<InvoicingUseCase<O, I, B>>>,
    _admin: AuthAdmin,
    Json(generate_invoices_model): Json<GenerateInvoicesModel>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    B: BillingInfoRepository + Send + Sync + 'static,
{
    let report = invoicing_usecase
        .create_for_orders(
            generate_invoices_model.order_ids,
            generate_invoices_model.invoice_type,
        )
        .await;
    Json(report).into_response()
}
