//! # Cart Aggregation
//!
//! Merges cart lines by product and turns a stored cart into a priced view.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Operations                                  │
//! │                                                                         │
//! │  add_line(P, 2) ─────► no line for P ─────► push CartLine{P, 2}         │
//! │  add_line(P, 3) ─────► line for P ────────► quantity 2 → 5              │
//! │                                                                         │
//! │  materialize(cart, catalog)                                             │
//! │      for each line ──► catalog.lookup(product_id)                       │
//! │                         ├── Some ──► LineProduct::Resolved(snapshot)    │
//! │                         └── None ──► LineProduct::Unresolved            │
//! │                                        (price 0, name "Unknown")        │
//! │                                                                         │
//! │  CartView::total() = Σ unit_price × quantity                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id`; adding the same product again merges
//! - Totals are derived on read, never stored
//! - A missing product never fails a read; it shows up as `Unresolved`
//! - Line totals and the cart total saturate at `i64::MAX` cents
//!
//! Quantity bounds are checked by the caller
//! (see [`crate::validation::validate_quantity`]).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::types::{CartStatus, Product};
use crate::UNKNOWN_PRODUCT_NAME;

// =============================================================================
// Stored Cart
// =============================================================================

/// A line in a cart: one product and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CartLine {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

/// A cart as persisted: header fields plus its lines in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub id: String,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub status: CartStatus,
    pub customer_note: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub lines: Vec<CartLine>,
}

/// What [`Cart::add_line`] changed, so storage can write exactly that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineChange {
    /// An existing line's quantity went from `previous` to `quantity`.
    Merged {
        line_id: String,
        previous: i64,
        quantity: i64,
    },
    /// A new line was appended.
    Inserted { line_id: String },
}

impl Cart {
    /// Creates a new empty, active cart.
    pub fn new(session_id: Option<String>, user_id: Option<String>) -> Self {
        Cart {
            id: Uuid::new_v4().to_string(),
            session_id,
            user_id,
            status: CartStatus::Active,
            customer_note: None,
            created_at: Utc::now(),
            lines: Vec::new(),
        }
    }

    /// Adds `quantity` of a product, merging into its existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity is incremented (not replaced)
    /// - Product not in cart: a new line is appended
    pub fn add_line(&mut self, product_id: &str, quantity: i64) -> LineChange {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            let previous = line.quantity;
            line.quantity = line.quantity.saturating_add(quantity);
            return LineChange::Merged {
                line_id: line.id.clone(),
                previous,
                quantity: line.quantity,
            };
        }

        let line = CartLine {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            quantity,
            added_at: Utc::now(),
        };
        let line_id = line.id.clone();
        self.lines.push(line);
        LineChange::Inserted { line_id }
    }

    /// Looks up the line for a product.
    pub fn line_for(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }
}

// =============================================================================
// Catalog Lookup
// =============================================================================

/// The catalog facts a cart line needs at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSnapshot {
    pub name: String,
    pub code: String,
    pub unit_price: Money,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        ProductSnapshot {
            name: product.name.clone(),
            code: product.code.clone(),
            unit_price: product.suggested_price(),
            image_url: product.image_url.clone(),
        }
    }
}

/// Resolves product ids to snapshots.
///
/// Storage loads the products a cart references and hands them over as a
/// map; tests can use a map directly.
pub trait CatalogLookup {
    fn lookup(&self, product_id: &str) -> Option<ProductSnapshot>;
}

impl CatalogLookup for HashMap<String, ProductSnapshot> {
    fn lookup(&self, product_id: &str) -> Option<ProductSnapshot> {
        self.get(product_id).cloned()
    }
}

impl CatalogLookup for HashMap<String, Product> {
    fn lookup(&self, product_id: &str) -> Option<ProductSnapshot> {
        self.get(product_id).map(ProductSnapshot::from)
    }
}

// =============================================================================
// Materialized View
// =============================================================================

/// The product side of a materialized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineProduct {
    Resolved(ProductSnapshot),
    /// The product no longer exists in the catalog.
    Unresolved,
}

impl LineProduct {
    pub fn is_resolved(&self) -> bool {
        matches!(self, LineProduct::Resolved(_))
    }

    /// Unit price, zero when unresolved.
    pub fn unit_price(&self) -> Money {
        match self {
            LineProduct::Resolved(p) => p.unit_price,
            LineProduct::Unresolved => Money::zero(),
        }
    }

    /// Display name, `"Unknown"` when unresolved.
    pub fn name(&self) -> &str {
        match self {
            LineProduct::Resolved(p) => &p.name,
            LineProduct::Unresolved => UNKNOWN_PRODUCT_NAME,
        }
    }

    /// Product code, empty when unresolved.
    pub fn code(&self) -> &str {
        match self {
            LineProduct::Resolved(p) => &p.code,
            LineProduct::Unresolved => "",
        }
    }

    /// Image URL, empty when unresolved or when the product has none.
    pub fn image_url(&self) -> &str {
        match self {
            LineProduct::Resolved(p) => p.image_url.as_deref().unwrap_or(""),
            LineProduct::Unresolved => "",
        }
    }
}

/// A cart line joined with its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub line_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub product: LineProduct,
}

impl CartLineView {
    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.unit_price().multiply_quantity(self.quantity)
    }
}

/// A priced, read-only view of a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub cart_id: String,
    pub lines: Vec<CartLineView>,
}

impl CartView {
    /// Σ unit_price × quantity. Zero for an empty cart.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLineView::line_total).sum()
    }

    /// Number of lines whose product could not be found.
    pub fn unresolved_count(&self) -> usize {
        self.lines.iter().filter(|l| !l.product.is_resolved()).count()
    }
}

/// Resolves every line of a cart against the catalog.
///
/// Never fails: a product missing from the catalog becomes
/// [`LineProduct::Unresolved`].
pub fn materialize(cart: &Cart, catalog: &impl CatalogLookup) -> CartView {
    let lines = cart
        .lines
        .iter()
        .map(|line| CartLineView {
            line_id: line.id.clone(),
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            product: catalog
                .lookup(&line.product_id)
                .map_or(LineProduct::Unresolved, LineProduct::Resolved),
        })
        .collect();

    CartView {
        cart_id: cart.id.clone(),
        lines,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(code: &str, price_cents: i64) -> ProductSnapshot {
        ProductSnapshot {
            name: format!("Product {}", code),
            code: code.to_string(),
            unit_price: Money::from_cents(price_cents),
            image_url: None,
        }
    }

    #[test]
    fn test_add_same_product_merges_quantity() {
        let mut cart = Cart::new(None, None);

        let first = cart.add_line("P", 2);
        let second = cart.add_line("P", 3);

        let LineChange::Inserted { line_id } = first else {
            panic!("first add should insert, got {first:?}");
        };
        assert_eq!(
            second,
            LineChange::Merged {
                line_id,
                previous: 2,
                quantity: 5,
            }
        );
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.line_for("P").map(|l| l.quantity), Some(5));
    }

    #[test]
    fn test_add_different_products_appends_in_order() {
        let mut cart = Cart::new(Some("session-1".to_string()), None);
        cart.add_line("A", 1);
        cart.add_line("B", 4);
        cart.add_line("A", 1);

        let ids: Vec<&str> = cart.lines.iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(cart.line_for("A").map(|l| l.quantity), Some(2));
        assert_eq!(cart.status, CartStatus::Active);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new(None, None);
        let view = materialize(&cart, &HashMap::<String, ProductSnapshot>::new());

        assert!(view.lines.is_empty());
        assert_eq!(view.total(), Money::zero());
    }

    #[test]
    fn test_total_sums_line_totals() {
        let mut cart = Cart::new(None, None);
        cart.add_line("A", 2);
        cart.add_line("B", 1);

        let mut catalog = HashMap::new();
        catalog.insert("A".to_string(), snapshot("A", 1000));
        catalog.insert("B".to_string(), snapshot("B", 500));

        let view = materialize(&cart, &catalog);
        assert_eq!(view.lines[0].line_total(), Money::from_cents(2000));
        assert_eq!(view.total(), Money::from_cents(2500));
        assert_eq!(view.unresolved_count(), 0);
    }

    #[test]
    fn test_missing_product_degrades_to_unresolved() {
        let mut cart = Cart::new(None, None);
        cart.add_line("A", 2);
        cart.add_line("GONE", 7);

        let mut catalog = HashMap::new();
        catalog.insert("A".to_string(), snapshot("A", 1000));

        let view = materialize(&cart, &catalog);
        let gone = &view.lines[1];

        assert_eq!(gone.product, LineProduct::Unresolved);
        assert_eq!(gone.product.name(), "Unknown");
        assert_eq!(gone.product.code(), "");
        assert_eq!(gone.product.image_url(), "");
        assert_eq!(gone.quantity, 7);
        assert_eq!(gone.line_total(), Money::zero());
        assert_eq!(view.total(), Money::from_cents(2000));
        assert_eq!(view.unresolved_count(), 1);
    }

    #[test]
    fn test_total_clamps_for_prices_near_the_limit() {
        let price = i64::MAX / 2 + 1;
        assert!(crate::validation::validate_price_cents("suggestedPrice", price).is_ok());

        let mut cart = Cart::new(None, None);
        cart.add_line("A", 2);
        cart.add_line("B", 1);

        let mut catalog = HashMap::new();
        catalog.insert("A".to_string(), snapshot("A", price));
        catalog.insert("B".to_string(), snapshot("B", 500));

        let view = materialize(&cart, &catalog);
        assert_eq!(view.lines[0].line_total(), Money::from_cents(i64::MAX));
        assert_eq!(view.total(), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_lookup_from_products() {
        let product = Product {
            id: "p-1".to_string(),
            code: "TS-001".to_string(),
            name: "Blue T-Shirt".to_string(),
            description: None,
            suggested_price_cents: 1299,
            cost_price_cents: Some(700),
            cost_code: Some("E".to_string()),
            image_url: Some("/uploads/ts.jpg".to_string()),
            category_id: None,
            brand_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let mut catalog = HashMap::new();
        catalog.insert(product.id.clone(), product);

        let snap = catalog.lookup("p-1").unwrap();
        assert_eq!(snap.unit_price, Money::from_cents(1299));
        assert_eq!(snap.image_url.as_deref(), Some("/uploads/ts.jpg"));
        assert!(catalog.lookup("p-2").is_none());
    }
}
