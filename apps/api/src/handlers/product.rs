//! Product endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use kasir_core::{Product, ProductInput};

/// Query string of `GET /api/product`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
}

/// `GET /api/product?name=`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(query) = query?;
    let products = state.db.products().list(query.name.as_deref()).await?;
    Ok(Json(products))
}

/// `POST /api/product`
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(input) = body?;
    let product = state.db.products().create(&input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /api/product/{id}`
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = path?;
    state
        .db
        .products()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", id))
}

/// `PUT /api/product/{id}`
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = path?;
    let Json(input) = body?;
    let product = state.db.products().update(id, &input).await?;
    Ok(Json(product))
}

/// `DELETE /api/product/{id}`
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    state.db.products().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
