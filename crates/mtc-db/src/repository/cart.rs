//! # Cart Repository
//!
//! Persists carts and their lines, and materializes them against the
//! product table.
//!
//! ## Add-Line Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_line(cart_id, product_id, qty)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. load cart + lines            (read)                                 │
//! │  2. Cart::add_line (mtc-core)    (merge in memory)                      │
//! │  3. write the LineChange:                                               │
//! │       Merged   → UPDATE cart_items SET quantity = new                   │
//! │       Inserted → INSERT INTO cart_items                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Limitation
//! Steps 1-3 are a read-modify-write with no lock or version column. Two
//! concurrent adds of the same product can both read quantity N and both
//! write N + q, losing one increment. Two concurrent first adds race on the
//! `UNIQUE (cart_id, product_id)` index instead and one of them fails.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::repository::product::ProductRepository;
use mtc_core::cart::materialize;
use mtc_core::{Cart, CartLine, CartStatus, CartView, LineChange};

/// Cart header row.
#[derive(Debug, sqlx::FromRow)]
struct CartRow {
    id: String,
    session_id: Option<String>,
    user_id: Option<String>,
    status: CartStatus,
    customer_note: Option<String>,
    created_at: DateTime<Utc>,
}

impl CartRow {
    fn with_lines(self, lines: Vec<CartLine>) -> Cart {
        Cart {
            id: self.id,
            session_id: self.session_id,
            user_id: self.user_id,
            status: self.status,
            customer_note: self.customer_note,
            created_at: self.created_at,
            lines,
        }
    }
}

/// Repository for cart database operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Inserts a cart header. Lines are written through [`Self::add_line`].
    pub async fn create(&self, cart: &Cart) -> DbResult<Cart> {
        debug!(cart_id = %cart.id, "Creating cart");

        sqlx::query(
            r#"
            INSERT INTO carts (id, session_id, user_id, status, customer_note, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&cart.id)
        .bind(&cart.session_id)
        .bind(&cart.user_id)
        .bind(cart.status)
        .bind(&cart.customer_note)
        .bind(cart.created_at)
        .execute(&self.pool)
        .await?;

        Ok(cart.clone())
    }

    /// Loads a cart with its lines in insertion order.
    pub async fn get(&self, id: &str) -> DbResult<Option<Cart>> {
        let row = sqlx::query_as::<_, CartRow>(
            r#"
            SELECT id, session_id, user_id, status, customer_note, created_at
            FROM carts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT id, product_id, quantity, added_at
            FROM cart_items
            WHERE cart_id = ?1
            ORDER BY added_at, id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(row.with_lines(lines)))
    }

    /// Adds `quantity` of a product to a cart, merging with an existing line.
    ///
    /// Quantity is not validated here. See the module docs for the
    /// concurrency caveat.
    ///
    /// ## Returns
    /// * `Ok((cart, change))` - Updated cart and what was written
    /// * `Err(DbError::NotFound)` - Cart does not exist
    pub async fn add_line(
        &self,
        cart_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> DbResult<(Cart, LineChange)> {
        let mut cart = self
            .get(cart_id)
            .await?
            .ok_or_else(|| DbError::not_found("Cart", cart_id))?;

        let change = cart.add_line(product_id, quantity);

        match &change {
            LineChange::Merged {
                line_id,
                previous,
                quantity: new_quantity,
            } => {
                debug!(
                    cart_id = %cart_id,
                    product_id = %product_id,
                    previous,
                    quantity = new_quantity,
                    "Merging cart line"
                );

                sqlx::query("UPDATE cart_items SET quantity = ?2 WHERE id = ?1")
                    .bind(line_id)
                    .bind(new_quantity)
                    .execute(&self.pool)
                    .await?;
            }
            LineChange::Inserted { line_id } => {
                debug!(cart_id = %cart_id, product_id = %product_id, quantity, "Inserting cart line");

                // `line_for` cannot miss right after an insert.
                let added_at = cart
                    .line_for(product_id)
                    .map(|l| l.added_at)
                    .unwrap_or_else(Utc::now);

                sqlx::query(
                    r#"
                    INSERT INTO cart_items (id, cart_id, product_id, quantity, added_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                )
                .bind(line_id)
                .bind(cart_id)
                .bind(product_id)
                .bind(quantity)
                .bind(added_at)
                .execute(&self.pool)
                .await?;
            }
        }

        Ok((cart, change))
    }

    /// Loads a cart and prices it against the current catalog.
    ///
    /// Lines whose product is gone come back unresolved rather than failing.
    pub async fn view(&self, id: &str) -> DbResult<Option<CartView>> {
        let Some(cart) = self.get(id).await? else {
            return Ok(None);
        };

        Ok(Some(self.materialize(&cart).await?))
    }

    /// Prices an already loaded cart.
    pub async fn materialize(&self, cart: &Cart) -> DbResult<CartView> {
        let ids: Vec<String> = cart.lines.iter().map(|l| l.product_id.clone()).collect();
        let catalog = ProductRepository::new(self.pool.clone())
            .get_many(&ids)
            .await?;

        let view = materialize(cart, &catalog);

        let unresolved = view.unresolved_count();
        if unresolved > 0 {
            warn!(cart_id = %cart.id, unresolved, "Cart references missing products");
        }

        Ok(view)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
