//! # Product Repository
//!
//! Catalog operations for products. Checkout-time stock reads and
//! decrements live in [`super::ledger`], not here.
//!
//! ## Read Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product + Category Join                              │
//! │                                                                         │
//! │  GET /api/product?name=kopi                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  product p LEFT JOIN category c ON c.id = p.category_id                │
//! │  WHERE p.name LIKE '%kopi%'        (ASCII case-insensitive)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRow { .., category_name, category_description }               │
//! │       │                                                                 │
//! │       ▼  into_product()                                                 │
//! │  Product { .., category: Some(Category { .. }) }                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use futures_util::{Stream, TryStreamExt};
use sqlx::SqlitePool;
use tracing::debug;

use super::category::CategoryRepository;
use crate::error::{DbError, DbResult};
use kasir_core::validation::validate_product;
use kasir_core::{Category, Product, ProductInput};

/// Product/category join with a trailing clause appended at compile time.
macro_rules! select_product {
    ($tail:literal) => {
        concat!(
            r#"
            SELECT
                p.id,
                p.name,
                p.price,
                p.stock,
                p.category_id,
                c.name AS category_name,
                c.description AS category_description
            FROM product p
            LEFT JOIN category c ON c.id = p.category_id
            "#,
            $tail
        )
    };
}

/// Flat row shape of the product/category join.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: i64,
    stock: i64,
    category_id: i64,
    category_name: Option<String>,
    category_description: Option<String>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        let category = self.category_name.map(|name| Category {
            id: self.category_id,
            name,
            description: self.category_description.unwrap_or_default(),
        });

        Product {
            id: self.id,
            name: self.name,
            price: self.price,
            stock: self.stock,
            category_id: self.category_id,
            category,
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Case-insensitive name search
/// let results = repo.list(Some("kopi")).await?;
///
/// // Get by ID
/// let product = repo.get_by_id(7).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Streams products ordered by id, optionally filtered by a name
    /// substring.
    ///
    /// A blank filter is treated as no filter.
    pub fn stream_all(&self, name: Option<&str>) -> impl Stream<Item = DbResult<Product>> + '_ {
        let pattern = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| format!("%{}%", n));

        sqlx::query_as::<_, ProductRow>(select_product!(
            "WHERE (?1 IS NULL OR p.name LIKE ?1) ORDER BY p.id"
        ))
        .bind(pattern)
        .fetch(&self.pool)
        .map_ok(ProductRow::into_product)
        .map_err(DbError::from)
    }

    /// Lists products with their categories.
    ///
    /// ## Arguments
    /// * `name` - Optional case-insensitive substring of the product name
    pub async fn list(&self, name: Option<&str>) -> DbResult<Vec<Product>> {
        debug!(filter = ?name, "Listing products");

        let products: Vec<Product> = self.stream_all(name).try_collect().await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID, with its category.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(select_product!("WHERE p.id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ProductRow::into_product))
    }

    /// Creates a product.
    ///
    /// ## Errors
    /// - `DbError::Domain(InvalidInput)` for a blank name or negative price/stock
    /// - `DbError::NotFound` if `category_id` does not exist
    pub async fn create(&self, input: &ProductInput) -> DbResult<Product> {
        validate_product(input)?;
        self.ensure_category(input.category_id).await?;

        let name = input.name.trim();
        debug!(name = %name, category_id = input.category_id, "Creating product");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO product (name, price, stock, category_id)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .fetch_one(&self.pool)
        .await?;

        self.reload(id).await
    }

    /// Replaces a product's fields, including its stock level.
    ///
    /// ## Errors
    /// - `DbError::NotFound` if the product or the category does not exist
    pub async fn update(&self, id: i64, input: &ProductInput) -> DbResult<Product> {
        validate_product(input)?;
        self.ensure_category(input.category_id).await?;

        let name = input.name.trim();
        debug!(id = id, name = %name, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE product SET
                name = ?2,
                price = ?3,
                stock = ?4,
                category_id = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.reload(id).await
    }

    /// Deletes a product.
    ///
    /// Past transaction details keep their product id and name snapshot.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting product");

        let result = sqlx::query("DELETE FROM product WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Re-reads a just-written product so writes return the same shape as reads.
    async fn reload(&self, id: i64) -> DbResult<Product> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    async fn ensure_category(&self, category_id: i64) -> DbResult<()> {
        let categories = CategoryRepository::new(self.pool.clone());

        if !categories.exists(category_id).await? {
            return Err(DbError::not_found("Category", category_id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testing::{memory_db, seed_product};
    use kasir_core::{CoreError, ValidationError};

    #[tokio::test]
    async fn test_get_by_id_joins_category() {
        let db = memory_db().await;
        let seeded = seed_product(&db, "Kopi Susu", 18000, 10).await;

        let product = db.products().get_by_id(seeded.id).await.unwrap().unwrap();
        assert_eq!(product.name, "Kopi Susu");
        assert_eq!(product.stock, 10);

        let category = product.category.expect("joined category");
        assert_eq!(category.id, seeded.category_id);
        assert_eq!(category.name, "Kopi Susu category");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = memory_db().await;
        assert!(db.products().get_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_name_case_insensitively() {
        let db = memory_db().await;
        let kopi = seed_product(&db, "Kopi Susu", 18000, 10).await;
        let _teh = seed_product(&db, "Teh Manis", 5000, 10).await;
        let es_kopi = seed_product(&db, "Es KOPI", 15000, 10).await;

        let all = db.products().list(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let ids: Vec<i64> = db
            .products()
            .list(Some("kopi"))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![kopi.id, es_kopi.id]);

        assert_eq!(db.products().list(Some("  ")).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_returns_joined_category() {
        let db = memory_db().await;
        let created = seed_product(&db, "Kopi Susu", 18000, 10).await;

        let category = created.category.clone().expect("joined category");
        assert_eq!(category.id, created.category_id);
        assert_eq!(category.name, "Kopi Susu category");

        let fetched = db.products().get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_create_requires_existing_category() {
        let db = memory_db().await;

        let err = db
            .products()
            .create(&ProductInput {
                name: "Roti".to_string(),
                price: 7000,
                stock: 1,
                category_id: 77,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Category"));
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price() {
        let db = memory_db().await;
        let seeded = seed_product(&db, "Roti", 7000, 1).await;

        let err = db
            .products()
            .create(&ProductInput {
                name: "Roti Bakar".to_string(),
                price: -1,
                stock: 1,
                category_id: seeded.category_id,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidInput(ValidationError::Negative { .. }))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = memory_db().await;
        let seeded = seed_product(&db, "Roti", 7000, 1).await;
        let repo = db.products();

        let updated = repo
            .update(
                seeded.id,
                &ProductInput {
                    name: "Roti Tawar".to_string(),
                    price: 8000,
                    stock: 12,
                    category_id: seeded.category_id,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.stock, 12);

        let fetched = repo.get_by_id(seeded.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Roti Tawar");
        assert_eq!(fetched.price, 8000);
        assert_eq!(updated, fetched);

        repo.delete(seeded.id).await.unwrap();
        assert!(repo.get_by_id(seeded.id).await.unwrap().is_none());
        assert!(matches!(repo.delete(seeded.id).await, Err(DbError::NotFound { .. })));
    }
}
