//! # Report Repository
//!
//! Read-only aggregates over committed transactions in an inclusive date
//! window.
//!
//! ## Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  get_report(start, end)                                 │
//! │                                                                         │
//! │  Window: DATE(created_at) BETWEEN start AND end   (UTC calendar days)  │
//! │                                                                         │
//! │  1. Totals                                                             │
//! │     SUM(total_amount), COUNT(*)  FROM transactions                     │
//! │                                                                         │
//! │  2. Best seller                                                        │
//! │     transaction_details ⋈ transactions  (window)                       │
//! │     GROUP BY product_id                                                │
//! │     ORDER BY SUM(quantity) DESC, product_id ASC   ← ties: lowest id    │
//! │     LIMIT 1                                                            │
//! │                                                                         │
//! │  No rows in window → { 0, 0, { "", 0 } }                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two queries run outside any write scope. A checkout committing
//! between them can make totals and best seller disagree by one
//! transaction; each is individually consistent.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use kasir_core::{BestSeller, ReportResponse};

/// Repository for sales reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Aggregates transactions created between `start` and `end`, both
    /// inclusive.
    ///
    /// A reversed window (`start > end`) matches nothing and yields an
    /// empty report; callers that want to reject it validate first.
    pub async fn get_report(&self, start: NaiveDate, end: NaiveDate) -> DbResult<ReportResponse> {
        debug!(start = %start, end = %end, "Building sales report");

        let (total_revenue, total_transactions): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(total_amount), 0), COUNT(*)
            FROM transactions
            WHERE DATE(created_at) BETWEEN ?1 AND ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        let best_seller = self.best_seller(start, end).await?.unwrap_or_default();

        Ok(ReportResponse {
            total_revenue,
            total_transactions,
            best_seller,
        })
    }

    /// Report for the current UTC day.
    pub async fn get_report_today(&self) -> DbResult<ReportResponse> {
        let today = Utc::now().date_naive();
        self.get_report(today, today).await
    }

    /// Product with the most units sold in the window.
    ///
    /// Named by the product's current name, falling back to the sale-time
    /// snapshot if the product has since been deleted.
    async fn best_seller(&self, start: NaiveDate, end: NaiveDate) -> DbResult<Option<BestSeller>> {
        let row: Option<(String, i64)> = sqlx::query_as(
            r#"
            SELECT
                COALESCE(p.name, MAX(td.product_name)) AS name,
                SUM(td.quantity) AS qty_sold
            FROM transaction_details td
            JOIN transactions t ON t.id = td.transaction_id
            LEFT JOIN product p ON p.id = td.product_id
            WHERE DATE(t.created_at) BETWEEN ?1 AND ?2
            GROUP BY td.product_id
            ORDER BY qty_sold DESC, td.product_id ASC
            LIMIT 1
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(name, qty_sold)| BestSeller { name, qty_sold }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testing::{memory_db, seed_product};
    use crate::Database;
    use kasir_core::CheckoutItem;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn checkout(db: &Database, lines: &[(i64, i64)]) -> i64 {
        let items: Vec<CheckoutItem> = lines
            .iter()
            .map(|&(product_id, quantity)| CheckoutItem {
                product_id,
                quantity,
            })
            .collect();

        db.transactions().checkout(&items).await.unwrap().id
    }

    async fn backdate(db: &Database, transaction_id: i64, created_at: &str) {
        sqlx::query("UPDATE transactions SET created_at = ?2 WHERE id = ?1")
            .bind(transaction_id)
            .bind(created_at)
            .execute(db.pool())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_report_over_window() {
        let db = memory_db().await;
        let a = seed_product(&db, "Indomie Goreng", 1000, 100).await;
        let b = seed_product(&db, "Telur", 2000, 100).await;

        let t1 = checkout(&db, &[(a.id, 2), (b.id, 1)]).await; // 4000
        let t2 = checkout(&db, &[(b.id, 3)]).await; // 6000
        let t3 = checkout(&db, &[(a.id, 9)]).await; // 9000, outside window

        backdate(&db, t1, "2025-01-15 10:00:00").await;
        backdate(&db, t2, "2025-01-20 23:59:59").await;
        backdate(&db, t3, "2025-02-01 00:00:00").await;

        let report = db
            .reports()
            .get_report(date("2025-01-15"), date("2025-01-31"))
            .await
            .unwrap();

        assert_eq!(report.total_revenue, 10000);
        assert_eq!(report.total_transactions, 2);
        assert_eq!(
            report.best_seller,
            BestSeller {
                name: "Telur".to_string(),
                qty_sold: 4,
            }
        );
    }

    #[tokio::test]
    async fn test_empty_window() {
        let db = memory_db().await;
        let a = seed_product(&db, "Indomie Goreng", 1000, 100).await;
        let t1 = checkout(&db, &[(a.id, 1)]).await;
        backdate(&db, t1, "2024-12-31 08:00:00").await;

        let report = db
            .reports()
            .get_report(date("2025-01-01"), date("2025-01-31"))
            .await
            .unwrap();

        assert_eq!(report, ReportResponse::default());
        assert_eq!(report.best_seller.name, "");
    }

    #[tokio::test]
    async fn test_reversed_window_is_empty() {
        let db = memory_db().await;
        let a = seed_product(&db, "Indomie Goreng", 1000, 100).await;
        let t1 = checkout(&db, &[(a.id, 1)]).await;
        backdate(&db, t1, "2025-01-15 08:00:00").await;

        let report = db
            .reports()
            .get_report(date("2025-01-31"), date("2025-01-01"))
            .await
            .unwrap();

        assert_eq!(report, ReportResponse::default());
    }

    #[tokio::test]
    async fn test_best_seller_tie_goes_to_lowest_product_id() {
        let db = memory_db().await;
        let a = seed_product(&db, "Indomie Goreng", 1000, 100).await;
        let b = seed_product(&db, "Telur", 2000, 100).await;

        checkout(&db, &[(b.id, 2)]).await;
        checkout(&db, &[(a.id, 2)]).await;

        let report = db.reports().get_report_today().await.unwrap();
        assert_eq!(report.total_transactions, 2);
        assert_eq!(report.best_seller.name, "Indomie Goreng");
        assert_eq!(report.best_seller.qty_sold, 2);
    }

    #[tokio::test]
    async fn test_best_seller_falls_back_to_snapshot_name() {
        let db = memory_db().await;
        let a = seed_product(&db, "Sabun", 4000, 10).await;

        checkout(&db, &[(a.id, 3)]).await;
        db.products().delete(a.id).await.unwrap();

        let report = db.reports().get_report_today().await.unwrap();
        assert_eq!(report.best_seller.name, "Sabun");
        assert_eq!(report.best_seller.qty_sold, 3);
    }
}
