//! # Seed Data Generator
//!
//! Populates the database with a demo catalog and back-office users.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p mtc-db --bin seed
//!
//! # Specify database path and admin password
//! cargo run -p mtc-db --bin seed -- --db ./data/mtc.db --admin-password s3cret
//! ```
//!
//! ## Generated Data
//! - Categories: Clothing (Shirts, Pants), Accessories
//! - Brands: a handful of apparel brands
//! - Products: one per (category, item, size), with cost prices so every
//!   product gets a derived cost code
//! - Users: `admin` (admin) and `staff` (staff)

use std::env;

use mtc_core::{NewProduct, UserRole};
use mtc_db::{Database, DbConfig};

/// (category, parent, items)
const CATEGORIES: &[(&str, Option<&str>, &[&str])] = &[
    ("Clothing", None, &[]),
    (
        "Shirts",
        Some("Clothing"),
        &["Oxford Shirt", "Linen Shirt", "Polo", "Graphic Tee", "Flannel"],
    ),
    (
        "Pants",
        Some("Clothing"),
        &["Slim Jeans", "Chinos", "Cargo Pants", "Joggers"],
    ),
    (
        "Accessories",
        None,
        &["Leather Belt", "Wool Scarf", "Baseball Cap", "Canvas Tote"],
    ),
];

const BRANDS: &[&str] = &["Levi's", "Uniqlo", "Zara", "H&M", "Nike"];

/// Size variants and their price addon in cents.
const SIZES: &[(&str, i64)] = &[("S", 0), ("M", 0), ("L", 2_000), ("XL", 5_000)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("MTC_DB_PATH").unwrap_or_else(|_| "./data/mtc.db".to_string());
    let mut admin_password = String::from("admin123");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--admin-password" => {
                if i + 1 < args.len() {
                    admin_password = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("MTC Sales Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>              Database file path (default: ./data/mtc.db)");
                println!("      --admin-password <PW>    Password for the admin user (default: admin123)");
                println!("  -h, --help                   Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 MTC Sales Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Users
    db.users()
        .create("admin", &admin_password, UserRole::Admin, Some("Store Admin"))
        .await?;
    db.users()
        .create("staff", "staff123", UserRole::Staff, Some("Floor Staff"))
        .await?;
    println!("✓ Created users: admin, staff");

    // Brands
    let mut brand_ids = Vec::with_capacity(BRANDS.len());
    for name in BRANDS {
        brand_ids.push(db.catalog().create_brand(name).await?.id);
    }
    println!("✓ Created {} brands", brand_ids.len());

    // Categories and products
    let mut category_ids: Vec<(&str, i64)> = Vec::new();
    let mut generated = 0usize;
    let start = std::time::Instant::now();

    for (category_idx, (category, parent, items)) in CATEGORIES.iter().enumerate() {
        let parent_id = parent.and_then(|p| {
            category_ids
                .iter()
                .find(|(name, _)| *name == p)
                .map(|(_, id)| *id)
        });
        let category_id = db.catalog().create_category(category, parent_id).await?.id;
        category_ids.push((*category, category_id));

        for (item_idx, item) in items.iter().enumerate() {
            for (size, price_addon) in SIZES {
                let seed = category_idx * 100 + item_idx * 10 + generated;
                let input = generate_product(
                    category,
                    item,
                    size,
                    *price_addon,
                    seed,
                    category_id,
                    brand_ids[seed % brand_ids.len()],
                );

                let code = input.code.clone();
                let (product, _) = input.into_product();
                if let Err(e) = db.products().insert(&product).await {
                    eprintln!("Failed to insert {}: {}", code, e);
                    continue;
                }

                generated += 1;
            }
        }
    }

    println!(
        "✓ Created {} categories, {} products in {:?}",
        category_ids.len(),
        generated,
        start.elapsed()
    );

    let shirts = db.products().list("shirt").await?;
    println!("  Search 'shirt': {} results", shirts.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates one product input. The cost code is left for the cost rule.
fn generate_product(
    category: &str,
    item: &str,
    size: &str,
    price_addon: i64,
    seed: usize,
    category_id: i64,
    brand_id: i64,
) -> NewProduct {
    let prefix: String = category.chars().take(3).collect::<String>().to_uppercase();
    let code = format!("{}-{:04}-{}", prefix, seed, size);

    // Whole-unit prices between 150.00 and 949.00, plus the size addon.
    let suggested_price_cents = (150 + ((seed * 37) % 800) as i64) * 100 + price_addon;

    // Cost is 50-70% of the suggested price.
    let cost_pct = 50 + (seed % 21) as i64;
    let cost_price_cents = suggested_price_cents * cost_pct / 100;

    NewProduct {
        code,
        name: format!("{} ({})", item, size),
        description: Some(format!("{} in size {}", item, size)),
        suggested_price_cents,
        cost_price_cents: Some(cost_price_cents),
        cost_code: None,
        image_url: None,
        category_id: Some(category_id),
        brand_id: Some(brand_id),
    }
}
