//! Transaction lookup endpoint.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use kasir_core::Transaction;

/// `GET /api/transaction/{id}`
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Transaction>> {
    let Path(id) = path?;
    state
        .db
        .transactions()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Transaction", id))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::testing::{app, send};

    #[tokio::test]
    async fn test_missing_transaction() {
        let (app, _db) = app().await;

        let (status, body) = send(&app, Method::GET, "/api/transaction/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Transaction not found: 1");
    }
}
