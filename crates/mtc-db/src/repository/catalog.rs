//! # Catalog Repository
//!
//! Categories and brands: small lookup tables products point at.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use mtc_core::{Brand, Category};

/// Repository for categories and brands.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Lists all categories ordered by name.
    pub async fn list_categories(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, parent_id FROM categories ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn get_category(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, parent_id FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Creates a category, optionally under a parent.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Parent category does not exist
    pub async fn create_category(&self, name: &str, parent_id: Option<i64>) -> DbResult<Category> {
        debug!(name = %name, ?parent_id, "Creating category");

        let result = sqlx::query("INSERT INTO categories (name, parent_id) VALUES (?1, ?2)")
            .bind(name)
            .bind(parent_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::ForeignKeyViolation { .. } => {
                    DbError::not_found("Category", parent_id.unwrap_or_default().to_string())
                }
                err => err,
            })?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            parent_id,
        })
    }

    // =========================================================================
    // Brands
    // =========================================================================

    /// Lists all brands ordered by name.
    pub async fn list_brands(&self) -> DbResult<Vec<Brand>> {
        let brands = sqlx::query_as::<_, Brand>("SELECT id, name FROM brands ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;

        Ok(brands)
    }

    pub async fn get_brand(&self, id: i64) -> DbResult<Option<Brand>> {
        let brand = sqlx::query_as::<_, Brand>("SELECT id, name FROM brands WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(brand)
    }

    /// Creates a brand.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - A brand with this name exists
    pub async fn create_brand(&self, name: &str) -> DbResult<Brand> {
        debug!(name = %name, "Creating brand");

        let result = sqlx::query("INSERT INTO brands (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                err if err.is_unique_violation_on("brands.name") => DbError::duplicate("name", name),
                err => err,
            })?;

        Ok(Brand {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn repo() -> CatalogRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().catalog()
    }

    #[tokio::test]
    async fn test_categories_nest() {
        let repo = repo().await;

        let clothing = repo.create_category("Clothing", None).await.unwrap();
        let shirts = repo.create_category("Shirts", Some(clothing.id)).await.unwrap();

        assert_eq!(shirts.parent_id, Some(clothing.id));
        assert_eq!(repo.get_category(shirts.id).await.unwrap(), Some(shirts));

        let names: Vec<String> = repo
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Clothing", "Shirts"]);
    }

    #[tokio::test]
    async fn test_category_with_unknown_parent() {
        let repo = repo().await;
        let err = repo.create_category("Orphan", Some(99)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_brands() {
        let repo = repo().await;

        let levis = repo.create_brand("Levi's").await.unwrap();
        repo.create_brand("Adidas").await.unwrap();

        assert_eq!(repo.get_brand(levis.id).await.unwrap(), Some(levis));
        assert_eq!(repo.list_brands().await.unwrap()[0].name, "Adidas");

        let err = repo.create_brand("Adidas").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
