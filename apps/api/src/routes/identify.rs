//! # Mock Image Identification
//!
//! Stand-in for a vision model. The pick is deterministic in the upload
//! size so a client can reproduce it; the confidence is random.
//!
//! ```text
//!   file (n bytes) ──► products ordered by code ──► products[n % count]
//!                                                   confidence ∈ [0.70, 0.99]
//! ```

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::extract::require_file;
use crate::AppState;

pub const MIN_CONFIDENCE: f64 = 0.70;
pub const MAX_CONFIDENCE: f64 = 0.99;

pub fn routes() -> Router<AppState> {
    Router::new().route("/ai/identify", post(identify))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyResponse {
    pub product_id: String,
    pub product_code: String,
    pub product_name: String,
    pub confidence: f64,
}

async fn identify(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<IdentifyResponse>> {
    let file = require_file(multipart).await?;

    let products = state.db.products().list_by_code().await?;
    let index = pick_index(file.len(), products.len())
        .ok_or_else(|| {
            ApiError::new(ErrorCode::NotFound, "No products in catalog to identify against")
        })?;
    let product = &products[index];

    let confidence = confidence(&mut rand::thread_rng());
    debug!(size = file.len(), code = %product.code, confidence, "Identified product");

    Ok(Json(IdentifyResponse {
        product_id: product.id.clone(),
        product_code: product.code.clone(),
        product_name: product.name.clone(),
        confidence,
    }))
}

/// `file_size % count`, or `None` for an empty catalog.
pub fn pick_index(file_size: usize, count: usize) -> Option<usize> {
    file_size.checked_rem(count)
}

/// Uniform in `[MIN_CONFIDENCE, MAX_CONFIDENCE]`.
pub fn confidence(rng: &mut impl Rng) -> f64 {
    rng.gen_range(MIN_CONFIDENCE..=MAX_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_index() {
        assert_eq!(pick_index(10, 3), Some(1));
        assert_eq!(pick_index(2, 5), Some(2));
        assert_eq!(pick_index(10, 0), None);
    }

    #[test]
    fn test_confidence_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let c = confidence(&mut rng);
            assert!((MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&c));
        }
    }
}
