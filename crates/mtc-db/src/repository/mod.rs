//! # Repository Module
//!
//! Database repository implementations for MTC Sales.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       │  db.products().get_by_code("TS-001")                            │
//! │       ▼                                                                 │
//! │  ProductRepository  CartRepository  CatalogRepository  UserRepository   │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Products and product images
//! - [`cart::CartRepository`] - Carts, lines and materialized views
//! - [`catalog::CatalogRepository`] - Categories and brands
//! - [`user::UserRepository`] - Back-office users

pub mod cart;
pub mod catalog;
pub mod product;
pub mod user;
