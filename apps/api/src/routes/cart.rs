//! # Cart Routes
//!
//! Every response is the materialized cart: lines priced against the
//! current catalog, with a derived total.
//!
//! ```text
//! POST /api/cart              new empty cart
//! GET  /api/cart/{id}         materialized cart
//! POST /api/cart/{id}/items   add (merge) a line, returns the cart
//! ```

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::AppState;
use mtc_core::validation::{validate_quantity, validate_uuid};
use mtc_core::{Cart, CartLineView, CartView, LineChange};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cart", post(create_cart))
        .route("/cart/{id}", get(get_cart))
        .route("/cart/{id}/items", post(add_item))
}

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub product_id: String,
    pub name: String,
    pub code: String,
    pub price_cents: i64,
    pub quantity: i64,
    pub image_url: String,
    pub line_total_cents: i64,
    /// False when the product no longer exists.
    pub resolved: bool,
}

impl From<&CartLineView> for CartItemDto {
    fn from(line: &CartLineView) -> Self {
        CartItemDto {
            product_id: line.product_id.clone(),
            name: line.product.name().to_string(),
            code: line.product.code().to_string(),
            price_cents: line.product.unit_price().cents(),
            quantity: line.quantity,
            image_url: line.product.image_url().to_string(),
            line_total_cents: line.line_total().cents(),
            resolved: line.product.is_resolved(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    pub cart_id: String,
    pub items: Vec<CartItemDto>,
    pub total_cents: i64,
}

impl From<&CartView> for CartDto {
    fn from(view: &CartView) -> Self {
        CartDto {
            cart_id: view.cart_id.clone(),
            items: view.lines.iter().map(CartItemDto::from).collect(),
            total_cents: view.total().cents(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Creates an anonymous cart; no body is read.
async fn create_cart(State(state): State<AppState>) -> ApiResult<Json<CartDto>> {
    let cart = state.db.carts().create(&Cart::new(None, None)).await?;
    info!(cart_id = %cart.id, "Cart created");

    let view = state.db.carts().materialize(&cart).await?;
    Ok(Json(CartDto::from(&view)))
}

async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CartDto>> {
    let view = state
        .db
        .carts()
        .view(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Cart", &id))?;

    Ok(Json(CartDto::from(&view)))
}

async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<AddItemRequest>,
) -> ApiResult<Json<CartDto>> {
    validate_uuid("productId", &req.product_id)?;
    validate_quantity(req.quantity)?;

    if state.db.carts().get(&id).await?.is_none() {
        return Err(ApiError::not_found("Cart", &id));
    }

    if state.db.products().get_by_id(&req.product_id).await?.is_none() {
        return Err(ApiError::not_found("Product", &req.product_id));
    }

    let (cart, change) = state
        .db
        .carts()
        .add_line(&id, &req.product_id, req.quantity)
        .await?;

    match &change {
        LineChange::Merged { previous, quantity, .. } => info!(
            cart_id = %id,
            product_id = %req.product_id,
            previous,
            quantity,
            "Cart line merged"
        ),
        LineChange::Inserted { .. } => info!(
            cart_id = %id,
            product_id = %req.product_id,
            quantity = req.quantity,
            "Cart line added"
        ),
    }

    let view = state.db.carts().materialize(&cart).await?;
    Ok(Json(CartDto::from(&view)))
}
