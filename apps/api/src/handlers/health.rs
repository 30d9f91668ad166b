//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::AppState;
use kasir_db::migrations::migration_status;

/// `GET /health`
///
/// ```json
/// { "status": "ok", "migrations": { "applied": 1, "total": 1 } }
/// ```
///
/// 503 when the database is unreachable or the schema is behind the binary.
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    if !state.db.health_check().await {
        tracing::warn!("Health check failed: database unreachable");
        return Err(ApiError::new(ErrorCode::Unavailable, "Database unreachable"));
    }

    let (total, applied) = migration_status(state.db.pool()).await?;
    if applied < total {
        tracing::warn!(applied, total, "Health check failed: pending migrations");
        return Err(ApiError::new(
            ErrorCode::Unavailable,
            format!("Pending migrations: {} of {} applied", applied, total),
        ));
    }

    Ok(Json(json!({
        "status": "ok",
        "migrations": { "applied": applied, "total": total }
    })))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::testing::{app, send};

    #[tokio::test]
    async fn test_health_ok() {
        let (app, _db) = app().await;

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["migrations"]["total"].as_u64().unwrap() >= 1);
        assert_eq!(body["migrations"]["applied"], body["migrations"]["total"]);
    }

    #[tokio::test]
    async fn test_health_unavailable_after_close() {
        let (app, db) = app().await;
        db.close().await;

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_health_unavailable_with_pending_migrations() {
        let (app, db) = app().await;
        sqlx::query("DELETE FROM _sqlx_migrations")
            .execute(db.pool())
            .await
            .unwrap();

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["message"].as_str().unwrap().starts_with("Pending migrations"));
    }
}
