//! # Route Handlers
//!
//! Each module owns its DTOs and a `routes()` fragment; [`api_routes`]
//! stitches them under `/api`.

use axum::Router;

use crate::AppState;

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod health;
pub mod identify;
pub mod price_code;
pub mod product;

/// All `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(price_code::routes())
        .merge(product::routes())
        .merge(catalog::routes())
        .merge(cart::routes())
        .merge(auth::routes())
        .merge(identify::routes())
}
