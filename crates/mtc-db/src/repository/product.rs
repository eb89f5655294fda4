//! # Product Repository
//!
//! Database operations for products and their images.
//!
//! ## Key Operations
//! - Insert (duplicate codes surface as `UniqueViolation`)
//! - Lookup by business code or UUID
//! - Keyword listing across name, code and description
//! - Batch lookup for materializing carts
//! - Image records and the primary image URL
//!
//! ## Keyword Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  keyword "shirt"                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LIKE '%shirt%' ESCAPE '\' on name, code, description                   │
//! │  (SQLite LIKE is case-insensitive for ASCII)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TS-001 | Blue T-Shirt   ← MATCH (name)                                 │
//! │  TS-002 | Red Tee        ← MATCH (description "cotton shirt")           │
//! │  JN-001 | Slim Jeans                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use mtc_core::{Product, ProductImage};

const PRODUCT_COLUMNS: &str = r#"
    id, code, name, description,
    suggested_price_cents, cost_price_cents, cost_code,
    image_url, category_id, brand_id,
    created_at, updated_at
"#;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The inserted product
    /// * `Err(DbError::UniqueViolation)` - Code already exists
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown category or brand
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(code = %product.code, "Inserting product");

        let sql = format!(
            "INSERT INTO products ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            PRODUCT_COLUMNS
        );

        sqlx::query(&sql)
            .bind(&product.id)
            .bind(&product.code)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.suggested_price_cents)
            .bind(product.cost_price_cents)
            .bind(&product.cost_code)
            .bind(&product.image_url)
            .bind(product.category_id)
            .bind(product.brand_id)
            .bind(product.created_at)
            .bind(product.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                err if err.is_unique_violation_on("products.code") => {
                    DbError::duplicate("code", &product.code)
                }
                err => err,
            })?;

        Ok(product.clone())
    }

    /// Gets a product by its business code.
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE code = ?1", PRODUCT_COLUMNS);

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product by its UUID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS);

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Checks whether a code is taken.
    pub async fn code_exists(&self, code: &str) -> DbResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE code = ?1)")
            .bind(code)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// Lists products, optionally filtered by keyword.
    ///
    /// An empty keyword returns every product. Results are ordered by name.
    pub async fn list(&self, keyword: &str) -> DbResult<Vec<Product>> {
        let keyword = keyword.trim();

        debug!(keyword = %keyword, "Listing products");

        let products = if keyword.is_empty() {
            let sql = format!("SELECT {} FROM products ORDER BY name, code", PRODUCT_COLUMNS);
            sqlx::query_as::<_, Product>(&sql)
                .fetch_all(&self.pool)
                .await?
        } else {
            let sql = format!(
                r#"
                SELECT {} FROM products
                WHERE name LIKE ?1 ESCAPE '\'
                   OR code LIKE ?1 ESCAPE '\'
                   OR description LIKE ?1 ESCAPE '\'
                ORDER BY name, code
                "#,
                PRODUCT_COLUMNS
            );
            sqlx::query_as::<_, Product>(&sql)
                .bind(like_pattern(keyword))
                .fetch_all(&self.pool)
                .await?
        };

        debug!(count = products.len(), "Listing returned products");
        Ok(products)
    }

    /// Lists every product ordered by code.
    ///
    /// The order is stable, so an index into it picks the same product for
    /// the same catalog.
    pub async fn list_by_code(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {} FROM products ORDER BY code", PRODUCT_COLUMNS);

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Loads the given products keyed by id. Missing ids are simply absent.
    pub async fn get_many(&self, ids: &[String]) -> DbResult<HashMap<String, Product>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM products WHERE id IN (", PRODUCT_COLUMNS));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        Ok(products.into_iter().map(|p| (p.id.clone(), p)).collect())
    }

    /// Counts products (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// Records an uploaded image for a product.
    ///
    /// The first image also becomes the product's `image_url`; later uploads
    /// leave an existing primary image alone.
    pub async fn add_image(&self, product_id: &str, image_url: &str) -> DbResult<ProductImage> {
        debug!(product_id = %product_id, url = %image_url, "Adding product image");

        let image = ProductImage {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            image_url: image_url.to_string(),
            created_at: Utc::now(),
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO product_images (id, product_id, image_url, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&image.id)
        .bind(&image.product_id)
        .bind(&image.image_url)
        .bind(image.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::ForeignKeyViolation { .. } => DbError::not_found("Product", product_id),
            err => err,
        })?;

        sqlx::query(
            r#"
            UPDATE products
            SET image_url = ?2, updated_at = ?3
            WHERE id = ?1 AND (image_url IS NULL OR image_url = '')
            "#,
        )
        .bind(product_id)
        .bind(image_url)
        .bind(image.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(image)
    }

    /// Lists a product's images, oldest first.
    pub async fn list_images(&self, product_id: &str) -> DbResult<Vec<ProductImage>> {
        let images = sqlx::query_as::<_, ProductImage>(
            r#"
            SELECT id, product_id, image_url, created_at
            FROM product_images
            WHERE product_id = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }
}

/// Builds a `%keyword%` LIKE pattern with `%`, `_` and `\` escaped.
fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use mtc_core::NewProduct;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_product(code: &str, name: &str) -> Product {
        NewProduct {
            code: code.to_string(),
            name: name.to_string(),
            suggested_price_cents: 1_000,
            ..Default::default()
        }
        .into_product()
        .0
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("shirt"), "%shirt%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[tokio::test]
    async fn test_insert_and_get_by_code() {
        let db = db().await;
        let mut product = new_product("TS-001", "Blue T-Shirt");
        product.cost_price_cents = Some(12_000);
        product.cost_code = Some("MAS".to_string());

        db.products().insert(&product).await.unwrap();

        let found = db.products().get_by_code("TS-001").await.unwrap().unwrap();
        assert_eq!(found.id, product.id);
        assert_eq!(found.cost_price_cents, Some(12_000));
        assert_eq!(found.cost_code.as_deref(), Some("MAS"));

        assert!(db.products().get_by_id(&product.id).await.unwrap().is_some());
        assert!(db.products().get_by_code("NOPE").await.unwrap().is_none());
        assert!(db.products().code_exists("TS-001").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_code_is_rejected() {
        let db = db().await;
        db.products()
            .insert(&new_product("TS-001", "Blue T-Shirt"))
            .await
            .unwrap();

        let err = db
            .products()
            .insert(&new_product("TS-001", "Another"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { ref field, ref value }
            if field == "code" && value == "TS-001"));
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_category_is_a_foreign_key_violation() {
        let db = db().await;
        let mut product = new_product("TS-001", "Blue T-Shirt");
        product.category_id = Some(42);

        let err = db.products().insert(&product).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_with_keyword() {
        let db = db().await;
        let repo = db.products();

        repo.insert(&new_product("TS-001", "Blue T-Shirt")).await.unwrap();
        let mut tee = new_product("TS-002", "Red Tee");
        tee.description = Some("Cotton shirt".to_string());
        repo.insert(&tee).await.unwrap();
        repo.insert(&new_product("JN-001", "Slim Jeans")).await.unwrap();

        assert_eq!(repo.list("").await.unwrap().len(), 3);

        let shirts = repo.list("SHIRT").await.unwrap();
        let codes: Vec<&str> = shirts.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["TS-001", "TS-002"]);

        assert_eq!(repo.list("jn-").await.unwrap().len(), 1);
        assert!(repo.list("100%").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_code_and_get_many() {
        let db = db().await;
        let repo = db.products();

        let b = new_product("B-1", "Alpha");
        let a = new_product("A-1", "Zulu");
        repo.insert(&b).await.unwrap();
        repo.insert(&a).await.unwrap();

        let ordered = repo.list_by_code().await.unwrap();
        assert_eq!(ordered[0].code, "A-1");
        assert_eq!(ordered[1].code, "B-1");

        let found = repo
            .get_many(&[a.id.clone(), "missing".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.contains_key(&a.id));
        assert!(repo.get_many(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_first_image_becomes_primary() {
        let db = db().await;
        let repo = db.products();
        let product = new_product("TS-001", "Blue T-Shirt");
        repo.insert(&product).await.unwrap();

        repo.add_image(&product.id, "/uploads/first.jpg").await.unwrap();
        repo.add_image(&product.id, "/uploads/second.jpg").await.unwrap();

        let stored = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(stored.image_url.as_deref(), Some("/uploads/first.jpg"));
        assert_eq!(repo.list_images(&product.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_image_for_unknown_product() {
        let db = db().await;
        let err = db
            .products()
            .add_image("missing", "/uploads/x.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
