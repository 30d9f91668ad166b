//! Checkout endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::AppState;
use kasir_core::{CheckoutItem, Transaction};

/// Body of `POST /api/checkout`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

/// `POST /api/checkout`
///
/// All items commit together or not at all.
pub async fn checkout(
    State(state): State<AppState>,
    body: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let Json(request) = body?;
    let transaction = state.db.transactions().checkout(&request.items).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}
