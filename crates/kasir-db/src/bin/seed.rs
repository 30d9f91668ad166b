//! # Seed Data Generator
//!
//! Populates the database with a small warung catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./kasir_dev.db (default)
//! cargo run -p kasir-db --bin seed
//!
//! # Specify database path (falls back to $DB_CONN)
//! cargo run -p kasir-db --bin seed -- --db ./data/kasir.db
//!
//! # Multiply every stock level
//! cargo run -p kasir-db --bin seed -- --stock-factor 10
//! ```
//!
//! ## Generated Catalog
//! One category per group below; every product gets a deterministic price
//! and stock so repeated seeds of a fresh database are identical.

use std::env;

use kasir_core::{CategoryInput, Money, ProductInput};
use kasir_db::{Database, DbConfig};

/// (category, description, products as (name, price))
const CATALOG: &[(&str, &str, &[(&str, i64)])] = &[
    (
        "Minuman",
        "Minuman dingin dan panas",
        &[
            ("Teh Botol Sosro", 5000),
            ("Aqua 600ml", 3500),
            ("Kopi Susu Gula Aren", 18000),
            ("Es Teh Manis", 4000),
            ("Pocari Sweat", 7500),
        ],
    ),
    (
        "Makanan",
        "Makanan instan dan siap saji",
        &[
            ("Indomie Goreng", 3500),
            ("Indomie Soto", 3200),
            ("Nasi Uduk", 12000),
            ("Roti Tawar", 15000),
        ],
    ),
    (
        "Camilan",
        "Keripik, biskuit, dan permen",
        &[
            ("Chitato Sapi Panggang", 11000),
            ("Tango Wafer", 8500),
            ("Kacang Garuda", 9000),
            ("Permen Kopiko", 1000),
        ],
    ),
    (
        "Kebutuhan Rumah",
        "Sabun, deterjen, dan perlengkapan dapur",
        &[
            ("Sabun Lifebuoy", 4500),
            ("Rinso 800g", 24000),
            ("Minyak Goreng 1L", 17500),
            ("Gula Pasir 1kg", 16000),
        ],
    ),
];

/// Stock level for the `idx`-th product of a category, `None` on overflow.
fn seed_stock(idx: usize, stock_factor: i64) -> Option<i64> {
    let base = 10 + (idx % 40) as i64 * 7 % 40;
    base.checked_mul(stock_factor)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("DB_CONN").unwrap_or_else(|_| String::from("./kasir_dev.db"));
    let mut stock_factor: i64 = 1;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--stock-factor" | "-s" => {
                if i + 1 < args.len() {
                    stock_factor = args[i + 1].parse().unwrap_or(1).max(1);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>            Database file path (default: $DB_CONN or ./kasir_dev.db)");
                println!("  -s, --stock-factor <N>     Multiply every stock level (default: 1)");
                println!("  -h, --help                 Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kasir Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing catalog
    let existing = db.categories().list().await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} categories", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating catalog...");

    let mut generated = 0;
    let mut stock_value = Money::zero();

    for (category_name, description, products) in CATALOG {
        let category = db
            .categories()
            .create(&CategoryInput {
                name: category_name.to_string(),
                description: description.to_string(),
            })
            .await?;

        for (idx, (name, price)) in products.iter().enumerate() {
            let Some(stock) = seed_stock(idx, stock_factor) else {
                eprintln!("Skipping {}: stock overflows with factor {}", name, stock_factor);
                continue;
            };

            let input = ProductInput {
                name: name.to_string(),
                price: *price,
                stock,
                category_id: category.id,
            };

            if let Err(e) = db.products().create(&input).await {
                eprintln!("Failed to insert {}: {}", name, e);
                continue;
            }

            if let Some(value) = Money::from_units(*price)
                .line_total(stock)
                .and_then(|v| stock_value.checked_add(v))
            {
                stock_value = value;
            }
            generated += 1;
        }

        println!("  {} → {} products", category.name, products.len());
    }

    println!();
    println!("✓ Generated {} products", generated);
    println!("  Stock value: {}", stock_value);

    // Verify search
    println!();
    println!("Verifying name search...");
    let results = db.products().list(Some("indomie")).await?;
    println!("  Search 'indomie': {} results", results.len());

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
