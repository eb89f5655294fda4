//! # Product Routes
//!
//! ```text
//! GET  /api/product?keyword=         list (public DTO)
//! POST /api/product                  create, runs the cost rule
//! GET  /api/product/{code}           one product (public DTO)
//! POST /api/product/{code}/reveal-cost   cost price + code, audited
//! GET  /api/product/{code}/images    uploaded images
//! POST /api/product/{code}/images    multipart upload
//! ```
//!
//! Cost fields only ever leave the server through `reveal-cost`.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::require_authorization;
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::extract::{require_file, ApiJson};
use crate::AppState;
use mtc_core::validation::{validate_new_product, validate_search_query};
use mtc_core::{CostDerivation, NewProduct, Product, ProductImage};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/product", get(list_products).post(create_product))
        .route("/product/{code}", get(get_product))
        .route("/product/{code}/reveal-cost", post(reveal_cost))
        .route("/product/{code}/images", get(list_images).post(upload_image))
}

// =============================================================================
// DTOs
// =============================================================================

/// Public view of a product. No cost fields.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub code: String,
    pub name: String,
    pub description: String,
    pub suggested_price_cents: i64,
    pub image_url: String,
    pub category_id: Option<i64>,
    pub brand_id: Option<i64>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id,
            code: p.code,
            name: p.name,
            description: p.description.unwrap_or_default(),
            suggested_price_cents: p.suggested_price_cents,
            image_url: p.image_url.unwrap_or_default(),
            category_id: p.category_id,
            brand_id: p.brand_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostResponse {
    /// Zero when the product has no cost on record.
    pub cost_price_cents: i64,
    pub cost_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: String,
    pub url: String,
}

impl From<ProductImage> for ImageDto {
    fn from(image: ProductImage) -> Self {
        ImageDto {
            id: image.id,
            url: image.image_url,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<ProductDto>>> {
    let keyword = validate_search_query(query.keyword.as_deref().unwrap_or_default())?;

    let products = state.db.products().list(&keyword).await?;
    debug!(keyword = %keyword, count = products.len(), "Listed products");

    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

async fn create_product(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewProduct>,
) -> ApiResult<impl IntoResponse> {
    validate_new_product(&input)?;

    let code = input.code.trim().to_string();
    if state.db.products().code_exists(&code).await? {
        return Err(ApiError::new(
            ErrorCode::Conflict,
            "Product code already exists",
        ));
    }

    let (product, derivation) = input.into_product();
    log_derivation(&product.code, &derivation);

    let product = state.db.products().insert(&product).await?;
    info!(code = %product.code, id = %product.id, "Product created");

    let location = format!("/api/product/{}", product.code);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ProductDto::from(product)),
    ))
}

async fn get_product(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<ProductDto>> {
    let product = find_product(&state, &code).await?;
    Ok(Json(product.into()))
}

async fn reveal_cost(
    State(state): State<AppState>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<CostResponse>> {
    require_authorization(&headers)?;

    let product = find_product(&state, &code).await?;

    info!(target: "audit", product_code = %product.code, "Cost price revealed");

    Ok(Json(CostResponse {
        cost_price_cents: product.cost_price_cents.unwrap_or(0),
        cost_code: product.cost_code,
    }))
}

async fn list_images(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Vec<ImageDto>>> {
    let product = find_product(&state, &code).await?;
    let images = state.db.products().list_images(&product.id).await?;

    Ok(Json(images.into_iter().map(ImageDto::from).collect()))
}

async fn upload_image(
    State(state): State<AppState>,
    Path(code): Path<String>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let product = find_product(&state, &code).await?;
    let file = require_file(multipart).await?;

    let url = state
        .uploads
        .save(file.file_name.as_deref(), &file.bytes)
        .await?;
    let image = state.db.products().add_image(&product.id, &url).await?;

    info!(code = %product.code, url = %image.image_url, size = file.len(), "Product image uploaded");

    Ok((StatusCode::CREATED, Json(ImageDto::from(image))))
}

// =============================================================================
// Helpers
// =============================================================================

async fn find_product(state: &AppState, code: &str) -> ApiResult<Product> {
    state
        .db
        .products()
        .get_by_code(code)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", code))
}

fn log_derivation(code: &str, derivation: &CostDerivation) {
    match derivation {
        CostDerivation::UndecodableCode(e) => {
            warn!(code = %code, error = %e, "Cost code is not decodable; cost price left empty")
        }
        CostDerivation::UnencodablePrice(e) => {
            warn!(code = %code, error = %e, "Cost price is not encodable; cost code left empty")
        }
        CostDerivation::SuppliedBoth { consistent: false } => {
            warn!(code = %code, "Cost price and cost code disagree; stored as given")
        }
        other => debug!(code = %code, derivation = ?other, "Cost fields reconciled"),
    }
}
