//! Category endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use kasir_core::{Category, CategoryInput};

/// `GET /api/category`
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.db.categories().list().await?;
    Ok(Json(categories))
}

/// `POST /api/category`
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(input) = body?;
    let category = state.db.categories().create(&input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// `GET /api/category/{id}`
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Category>> {
    let Path(id) = path?;
    state
        .db
        .categories()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Category", id))
}

/// `PUT /api/category/{id}`
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let Path(id) = path?;
    let Json(input) = body?;
    let category = state.db.categories().update(id, &input).await?;
    Ok(Json(category))
}

/// `DELETE /api/category/{id}`
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    state.db.categories().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
