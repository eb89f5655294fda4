//! # mtc-db: Database Layer for MTC Sales
//!
//! Database access for the MTC Sales backend, using SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MTC Sales Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /api/cart/{id}/items)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     mtc-db (THIS CRATE)                         │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │    │    │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │    │    │
//! │  │   │               │    │ ProductRepo   │    │              │    │    │
//! │  │   │ SqlitePool    │◄───│ CartRepo      │    │ 001_initial_ │    │    │
//! │  │   │               │    │ CatalogRepo   │    │   schema.sql │    │    │
//! │  │   │               │    │ UserRepo      │    │              │    │    │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (MTC_DB_PATH, default ./data/mtc.db)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mtc_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./data/mtc.db")).await?;
//! let products = db.products().list("shirt").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod password;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::cart::CartRepository;
pub use repository::catalog::CatalogRepository;
pub use repository::product::ProductRepository;
pub use repository::user::UserRepository;
