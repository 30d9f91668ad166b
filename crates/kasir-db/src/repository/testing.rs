//! Fixtures shared by the repository tests.

use kasir_core::{CategoryInput, Product, ProductInput};

use crate::{Database, DbConfig};

/// Fresh, fully migrated in-memory database.
pub(crate) async fn memory_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

/// Inserts a product under a freshly created category.
pub(crate) async fn seed_product(db: &Database, name: &str, price: i64, stock: i64) -> Product {
    let category = db
        .categories()
        .create(&CategoryInput {
            name: format!("{} category", name),
            description: String::new(),
        })
        .await
        .expect("seed category");

    db.products()
        .create(&ProductInput {
            name: name.to_string(),
            price,
            stock,
            category_id: category.id,
        })
        .await
        .expect("seed product")
}

/// Current stock of `product_id`, read straight from the table.
pub(crate) async fn stock_of(db: &Database, product_id: i64) -> i64 {
    sqlx::query_scalar("SELECT stock FROM product WHERE id = ?1")
        .bind(product_id)
        .fetch_one(db.pool())
        .await
        .expect("stock row")
}
