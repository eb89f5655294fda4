mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;
use mtc_core::UserRole;

// =============================================================================
// Price code
// =============================================================================

#[tokio::test]
async fn encode_whole_units() {
    let t = TestApp::new().await;

    let (status, body) = t
        .post_json("/api/price-code/encode", json!({ "priceCents": 102300 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "MSAC");

    let (_, body) = t
        .post_json("/api/price-code/encode", json!({ "priceCents": 1999 }))
        .await;
    assert_eq!(body["code"], "MY");

    let (_, body) = t
        .post_json("/api/price-code/encode", json!({ "priceCents": 0 }))
        .await;
    assert_eq!(body["code"], "S");
}

#[tokio::test]
async fn encode_rejects_negative() {
    let t = TestApp::new().await;

    let (status, body) = t
        .post_json("/api/price-code/encode", json!({ "priceCents": -100 }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn decode_is_case_insensitive() {
    let t = TestApp::new().await;

    let (status, body) = t
        .post_json("/api/price-code/decode", json!({ "code": "msac" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["priceCents"], 102300);

    let (_, body) = t
        .post_json("/api/price-code/decode", json!({ "code": "SAC" }))
        .await;
    assert_eq!(body["priceCents"], 2300);
}

#[tokio::test]
async fn decode_zero_is_not_an_error() {
    let t = TestApp::new().await;

    let (status, body) = t
        .post_json("/api/price-code/decode", json!({ "code": "S" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["priceCents"], 0);
}

#[tokio::test]
async fn decode_rejects_malformed_codes() {
    let t = TestApp::new().await;

    for code in ["XYZ", "", "   ", "MA5"] {
        let (status, body) = t
            .post_json("/api/price-code/decode", json!({ "code": code }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "code {code:?}");
        assert_eq!(body["code"], "INVALID_CODE");
    }

    let (status, body) = t
        .post_json("/api/price-code/decode", json!({ "code": "Y".repeat(25) }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_CODE");
}

#[tokio::test]
async fn decode_names_the_limit_when_too_large() {
    let t = TestApp::new().await;

    let (status, body) = t
        .post_json("/api/price-code/decode", json!({ "code": "Y".repeat(17) }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_CODE");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("too large"), "{message}");
    assert!(message.contains("92233720368547758"), "{message}");

    let (status, body) = t
        .post_json("/api/price-code/decode", json!({ "code": "YAACCEASCNRIHEEIR" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["priceCents"], 9_223_372_036_854_775_800i64);
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn login_success_and_failure() {
    let t = TestApp::new().await;
    t.db()
        .users()
        .create("admin", "s3cret", UserRole::Admin, Some("Store Admin"))
        .await
        .unwrap();

    let (status, body) = t
        .post_json(
            "/api/auth/login",
            json!({ "username": "admin", "password": "s3cret" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().unwrap().starts_with("mvp-token-"));
    assert_eq!(body["role"], "admin");
    assert_eq!(body["fullName"], "Store Admin");

    let (status, body) = t
        .post_json(
            "/api/auth/login",
            json!({ "username": "admin", "password": "wrong" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn login_falls_back_to_username() {
    let t = TestApp::new().await;
    t.db()
        .users()
        .create("staff", "pw", UserRole::Staff, None)
        .await
        .unwrap();

    let (_, body) = t
        .post_json("/api/auth/login", json!({ "username": "staff", "password": "pw" }))
        .await;

    assert_eq!(body["role"], "staff");
    assert_eq!(body["fullName"], "staff");
}

// =============================================================================
// Identify
// =============================================================================

#[tokio::test]
async fn identify_needs_a_catalog() {
    let t = TestApp::new().await;

    let (status, body) = t.post_file("/api/ai/identify", "photo.jpg", b"abcd").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn identify_rejects_empty_upload() {
    let t = TestApp::new().await;
    t.create_product("A", "Alpha", 100).await;

    let (status, body) = t.post_file("/api/ai/identify", "photo.jpg", b"").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn identify_picks_by_file_size() {
    let t = TestApp::new().await;
    t.create_product("C", "Gamma", 100).await;
    t.create_product("A", "Alpha", 100).await;
    t.create_product("B", "Beta", 100).await;

    // 4 bytes % 3 products = index 1 in code order
    let (status, body) = t.post_file("/api/ai/identify", "photo.jpg", b"abcd").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["productCode"], "B");
    assert_eq!(body["productName"], "Beta");

    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.70..=0.99).contains(&confidence));
}
