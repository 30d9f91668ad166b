//! # Category Repository
//!
//! Database operations for product categories.
//!
//! A category cannot be deleted while products still reference it; SQLite's
//! foreign key check rejects the DELETE and the error surfaces as
//! [`DbError::ForeignKeyViolation`].

use futures_util::{Stream, TryStreamExt};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasir_core::validation::validate_category;
use kasir_core::{Category, CategoryInput};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Streams every category ordered by id.
    ///
    /// Rows are decoded lazily as the stream is polled.
    pub fn stream_all(&self) -> impl Stream<Item = DbResult<Category>> + '_ {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description
            FROM category
            ORDER BY id
            "#,
        )
        .fetch(&self.pool)
        .map_err(DbError::from)
    }

    /// Lists every category ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        debug!("Listing categories");
        self.stream_all().try_collect().await
    }

    /// Gets a category by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Category))` - Category found
    /// * `Ok(None)` - Category not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description
            FROM category
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Whether a category with `id` exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM category WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Creates a category and returns it with its assigned id.
    pub async fn create(&self, input: &CategoryInput) -> DbResult<Category> {
        validate_category(input)?;

        let name = input.name.trim();
        debug!(name = %name, "Creating category");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO category (name, description)
            VALUES (?1, ?2)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(Category {
            id,
            name: name.to_string(),
            description: input.description.clone(),
        })
    }

    /// Replaces a category's fields.
    ///
    /// ## Errors
    /// `DbError::NotFound` if no category has `id`.
    pub async fn update(&self, id: i64, input: &CategoryInput) -> DbResult<Category> {
        validate_category(input)?;

        let name = input.name.trim();
        debug!(id = id, name = %name, "Updating category");

        let result = sqlx::query(
            r#"
            UPDATE category SET
                name = ?2,
                description = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(&input.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(Category {
            id,
            name: name.to_string(),
            description: input.description.clone(),
        })
    }

    /// Deletes a category.
    ///
    /// ## Errors
    /// - `DbError::NotFound` if no category has `id`
    /// - `DbError::ForeignKeyViolation` if products still belong to it
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting category");

        let result = sqlx::query("DELETE FROM category WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
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

    fn input(name: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = memory_db().await;
        let repo = db.categories();

        let created = repo.create(&input("  Minuman ")).await.unwrap();
        assert_eq!(created.name, "Minuman");

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(repo.get_by_id(created.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_id() {
        let db = memory_db().await;
        let repo = db.categories();

        let a = repo.create(&input("Makanan")).await.unwrap();
        let b = repo.create(&input("Minuman")).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all, vec![a, b]);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = memory_db().await;

        let err = db.categories().create(&input("   ")).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidInput(ValidationError::Required { .. }))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let db = memory_db().await;
        let repo = db.categories();

        assert!(matches!(
            repo.update(42, &input("Snack")).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(repo.delete(42).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let db = memory_db().await;
        let repo = db.categories();
        let created = repo.create(&input("Snack")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                &CategoryInput {
                    name: "Camilan".to_string(),
                    description: "Keripik dan kacang".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(repo.get_by_id(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_delete_with_products_is_rejected() {
        let db = memory_db().await;
        let product = seed_product(&db, "Teh Botol", 5000, 3).await;

        let err = db.categories().delete(product.category_id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        db.products().delete(product.id).await.unwrap();
        db.categories().delete(product.category_id).await.unwrap();
        assert!(!db.categories().exists(product.category_id).await.unwrap());
    }
}
