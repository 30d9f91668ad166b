//! Sales report endpoints.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::AppState;
use kasir_core::validation::{parse_date, validate_date_range};
use kasir_core::ReportResponse;

/// Query string of `GET /api/report`.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// `GET /api/report?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`
///
/// Both dates are inclusive. A reversed range is rejected here rather than
/// returning an empty report.
pub async fn range(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> ApiResult<Json<ReportResponse>> {
    let Query(query) = query?;

    let start = parse_date("start_date", query.start_date.as_deref().unwrap_or_default())?;
    let end = parse_date("end_date", query.end_date.as_deref().unwrap_or_default())?;
    validate_date_range(start, end)?;

    let report = state.db.reports().get_report(start, end).await?;
    Ok(Json(report))
}

/// `GET /api/report/today`
pub async fn today(State(state): State<AppState>) -> ApiResult<Json<ReportResponse>> {
    let report = state.db.reports().get_report_today().await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::testing::{app, send};

    #[tokio::test]
    async fn test_empty_window() {
        let (app, _db) = app().await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/report?start_date=2025-01-01&end_date=2025-01-31",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "total_revenue": 0,
                "total_transactions": 0,
                "best_seller": { "name": "", "qty_sold": 0 }
            })
        );
    }

    #[tokio::test]
    async fn test_invalid_ranges() {
        let (app, _db) = app().await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/report?start_date=2025-02-01&end_date=2025-01-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, _) = send(&app, Method::GET, "/api/report?start_date=2025-01-01", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::GET,
            "/api/report?start_date=01/01/2025&end_date=2025-01-31",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_today_counts_fresh_checkout() {
        let (app, _db) = app().await;

        let (_, category) = send(
            &app,
            Method::POST,
            "/api/category",
            Some(json!({ "name": "Minuman" })),
        )
        .await;
        let (_, product) = send(
            &app,
            Method::POST,
            "/api/product",
            Some(json!({
                "name": "Teh Botol",
                "price": 5000,
                "stock": 10,
                "category_id": category["id"]
            })),
        )
        .await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/checkout",
            Some(json!({ "items": [{ "product_id": product["id"], "quantity": 3 }] })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, Method::GET, "/api/report/today", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_revenue"], 15000);
        assert_eq!(body["total_transactions"], 1);
        assert_eq!(body["best_seller"]["name"], "Teh Botol");
        assert_eq!(body["best_seller"]["qty_sold"], 3);
    }
}
