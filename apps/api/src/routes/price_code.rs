//! Standalone price code conversion.
//!
//! Codes carry whole currency units, so `1999` cents encodes like `1900`.

use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::AppState;
use mtc_core::validation::validate_price_cents;
use mtc_core::{price_code, Money};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/price-code/encode", post(encode))
        .route("/price-code/decode", post(decode))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeRequest {
    pub price_cents: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CodeResponse {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct DecodeRequest {
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub price_cents: i64,
}

async fn encode(ApiJson(req): ApiJson<EncodeRequest>) -> ApiResult<Json<CodeResponse>> {
    validate_price_cents("priceCents", req.price_cents)?;

    let code = price_code::encode_money(Money::from_cents(req.price_cents))?;

    Ok(Json(CodeResponse {
        code: code.into_string(),
    }))
}

async fn decode(ApiJson(req): ApiJson<DecodeRequest>) -> ApiResult<Json<PriceResponse>> {
    let price = price_code::decode_money(&req.code)?;

    Ok(Json(PriceResponse {
        price_cents: price.cents(),
    }))
}
