//! Category and brand lookups.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::AppState;
use mtc_core::validation::validate_name;
use mtc_core::{Brand, Category};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/category", get(list_categories).post(create_category))
        .route("/brand", get(list_brands).post(create_brand))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBrandRequest {
    pub name: String,
}

async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.db.catalog().list_categories().await?))
}

async fn create_category(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    validate_name("name", &req.name)?;

    let category = state
        .db
        .catalog()
        .create_category(req.name.trim(), req.parent_id)
        .await?;
    info!(id = category.id, name = %category.name, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

async fn list_brands(State(state): State<AppState>) -> ApiResult<Json<Vec<Brand>>> {
    Ok(Json(state.db.catalog().list_brands().await?))
}

async fn create_brand(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateBrandRequest>,
) -> ApiResult<(StatusCode, Json<Brand>)> {
    validate_name("name", &req.name)?;

    let brand = state.db.catalog().create_brand(req.name.trim()).await?;
    info!(id = brand.id, name = %brand.name, "Brand created");

    Ok((StatusCode::CREATED, Json(brand)))
}
