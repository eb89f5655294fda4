//! # Domain Types
//!
//! Core domain types used throughout MTC Sales.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (int)       │   │  id (UUID)      │       │
//! │  │  code (unique)  │   │  name           │   │  username       │       │
//! │  │  suggested_     │   │  parent_id      │   │  password_hash  │       │
//! │  │    price_cents  │   └─────────────────┘   │  role           │       │
//! │  │  cost_price_    │                         └─────────────────┘       │
//! │  │    cents  🔒    │   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  cost_code  🔒  │   │     Brand       │   │  ProductImage   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │   🔒 internal: never serialized to the public product DTO               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Carts live in [`crate::cart`] because their behavior matters more than
//! their shape.
//!
//! ## Dual-Key Identity Pattern
//! Products have both:
//! - `id`: UUID v4 - immutable, used for database relations and cart lines
//! - `code`: human-readable business identifier, unique, used in URLs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cost::{self, CostDerivation, CostFields};
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier, unique across the catalog.
    pub code: String,

    /// Display name.
    pub name: String,

    pub description: Option<String>,

    /// Customer-facing price in cents.
    pub suggested_price_cents: i64,

    /// Internal cost in cents.
    pub cost_price_cents: Option<i64>,

    /// Price code form of the cost, as stored.
    pub cost_code: Option<String>,

    /// Primary image, set by the first upload.
    pub image_url: Option<String>,

    pub category_id: Option<i64>,

    pub brand_id: Option<i64>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the suggested price as Money.
    #[inline]
    pub fn suggested_price(&self) -> Money {
        Money::from_cents(self.suggested_price_cents)
    }

    /// Returns the cost price as Money, if known.
    #[inline]
    pub fn cost_price(&self) -> Option<Money> {
        self.cost_price_cents.map(Money::from_cents)
    }

    /// Returns both cost fields together.
    pub fn cost_fields(&self) -> CostFields {
        CostFields::new(self.cost_price(), self.cost_code.clone())
    }

    /// Case-insensitive substring match against name, code and description.
    ///
    /// An empty keyword matches everything.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&keyword)
            || self.code.to_lowercase().contains(&keyword)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&keyword))
    }
}

/// Input for creating a product.
///
/// Cost fields are optional; the missing one is derived by
/// [`crate::cost::reconcile`] before the row is written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub suggested_price_cents: i64,
    pub cost_price_cents: Option<i64>,
    pub cost_code: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<i64>,
    pub brand_id: Option<i64>,
}

impl NewProduct {
    /// Builds the product row to persist, running the cost rule once.
    ///
    /// Text fields are trimmed; blank optional text becomes `None`.
    pub fn into_product(self) -> (Product, CostDerivation) {
        let outcome = cost::reconcile(
            self.cost_price_cents.map(Money::from_cents),
            self.cost_code.map(|c| c.trim().to_string()),
        );
        let now = Utc::now();

        let product = Product {
            id: Uuid::new_v4().to_string(),
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            description: non_blank(self.description),
            suggested_price_cents: self.suggested_price_cents,
            cost_price_cents: outcome.fields.cost_price.map(|m| m.cents()),
            cost_code: outcome.fields.cost_code,
            image_url: non_blank(self.image_url),
            category_id: self.category_id,
            brand_id: self.brand_id,
            created_at: now,
            updated_at: now,
        };

        (product, outcome.derivation)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Product Image
// =============================================================================

/// An uploaded image attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ProductImage {
    pub id: String,
    pub product_id: String,
    pub image_url: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Category & Brand
// =============================================================================

/// A product category. Categories may nest through `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Brand {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// User
// =============================================================================

/// Role of a back-office user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Staff,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Staff
    }
}

/// A back-office user.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Argon2 PHC string. Never sent to clients.
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub full_name: Option<String>,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

// =============================================================================
// Cart Status
// =============================================================================

/// Lifecycle state of a cart. Only `Active` is produced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CartStatus {
    Active,
}

impl Default for CartStatus {
    fn default() -> Self {
        CartStatus::Active
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
