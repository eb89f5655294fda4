//! # mtc-core: Pure Business Logic for MTC Sales
//!
//! This crate holds the rules of the catalog and cart as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MTC Sales Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    /api/product, /api/cart, /api/price-code, /api/auth ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mtc-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐ │   │
//! │  │   │ price_code │  │   cost    │  │   cart    │  │   money   │ │   │
//! │  │   │  S M A C H │  │ price ⇄   │  │ merge +   │  │  cents    │ │   │
//! │  │   │  I N E R Y │  │   code    │  │  totals   │  │  (i64)    │ │   │
//! │  │   └────────────┘  └───────────┘  └───────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    mtc-db (Database Layer)                      │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`price_code`] - Digit ↔ letter codec for obfuscated cost prices
//! - [`cost`] - Keeps cost price and cost code derived from each other
//! - [`cart`] - Cart line aggregation and materialized cart views
//! - [`types`] - Domain types (Product, Category, Brand, User, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use mtc_core::price_code;
//!
//! let code = price_code::encode(1023);
//! assert_eq!(code.as_str(), "MSAC");
//! assert_eq!(price_code::decode("msac").unwrap(), 1023);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod cost;
pub mod error;
pub mod money;
pub mod price_code;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartLineView, CartView, CatalogLookup, LineChange, LineProduct, ProductSnapshot};
pub use cost::{CostDerivation, CostFields, CostOutcome};
pub use error::{PriceCodeError, ValidationError};
pub use money::Money;
pub use price_code::PriceCode;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity accepted in a single add-to-cart request.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Placeholder name shown for a cart line whose product no longer exists.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown";
