//! # MTC Sales API
//!
//! HTTP surface of the catalog and cart backend.
//!
//! ## Module Organization
//! ```text
//! mtc_api
//! ├── config      - Environment-based configuration
//! ├── error       - ApiError and its HTTP status mapping
//! ├── extract     - JSON extractor that rejects with ApiError
//! ├── auth        - Login check and the Authorization gate
//! ├── storage     - Uploaded image files
//! └── routes/
//!     ├── health      GET  /health
//!     ├── price_code  POST /api/price-code/{encode,decode}
//!     ├── product     /api/product...
//!     ├── catalog     /api/category, /api/brand
//!     ├── cart        /api/cart...
//!     ├── auth        POST /api/auth/login
//!     └── identify    POST /api/ai/identify
//! ```
//!
//! The binary (`main.rs`) only loads config, opens the database and serves
//! [`router`]; tests drive the same router in-process.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use mtc_db::Database;

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod storage;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};

use storage::UploadStore;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ApiConfig>,
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        let uploads = UploadStore::new(&config.upload_dir, config.public_upload_prefix.clone());
        AppState {
            db,
            config: Arc::new(config),
            uploads,
        }
    }
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config.upload_dir);

    Router::new()
        .route("/health", get(routes::health::health))
        .nest("/api", routes::api_routes())
        .nest_service(&state.config.public_upload_prefix, uploads)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
