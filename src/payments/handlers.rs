use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::Result,
    extract::ApiJson,
    payments::{
        dto::{CreatePaymentRequest, UpdateStatusRequest},
        repo_types::Payment,
        services,
    },
    state::AppState,
};

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/payments", post(create_payment).get(list_payments))
        .route("/payments/:id", put(update_payment_status))
}

#[instrument(skip(state, payload))]
pub async fn create_payment(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<Payment>)> {
    let payment = services::create(state.store.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

#[instrument(skip(state))]
pub async fn list_payments(State(state): State<AppState>) -> Result<Json<Vec<Payment>>> {
    let payments = services::list(state.store.as_ref()).await?;
    Ok(Json(payments))
}

#[instrument(skip(state, payload))]
pub async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateStatusRequest>,
) -> Result<Json<Payment>> {
    let payment = services::update_status(state.store.as_ref(), &id, payload).await?;
    Ok(Json(payment))
}
