//! Shared harness: an in-memory database, a throwaway upload directory and
//! helpers that drive the router without a socket.

#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use mtc_api::{router, ApiConfig, AppState};
use mtc_db::{Database, DbConfig};

pub const BOUNDARY: &str = "mtc-test-boundary";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub upload_dir: PathBuf,
}

impl TestApp {
    pub async fn new() -> Self {
        let upload_dir = std::env::temp_dir().join(format!("mtc-api-test-{}", uuid::Uuid::new_v4()));
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = AppState::new(db, ApiConfig::for_tests(&upload_dir));

        TestApp {
            app: router(state.clone()),
            state,
            upload_dir,
        }
    }

    pub fn db(&self) -> &Database {
        &self.state.db
    }

    /// Sends a request and returns the status and raw body.
    pub async fn send_raw(&self, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let res = self.app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let body = res.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    /// Sends a request and parses the body as JSON (`Null` when empty).
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = self.send_raw(req).await;
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request(uri, &body)).await
    }

    pub async fn post_file(&self, uri: &str, file_name: &str, bytes: &[u8]) -> (StatusCode, Value) {
        self.send(multipart_request(uri, file_name, bytes)).await
    }

    /// Creates a product and returns its public DTO.
    pub async fn create_product(&self, code: &str, name: &str, price_cents: i64) -> Value {
        let (status, body) = self
            .post_json(
                "/api/product",
                json!({ "code": code, "name": name, "suggestedPriceCents": price_cents }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }

    pub async fn create_cart(&self) -> String {
        let (status, body) = self
            .send(Request::post("/api/cart").body(Body::empty()).unwrap())
            .await;
        assert_eq!(status, StatusCode::OK);
        body["cartId"].as_str().unwrap().to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A one-field `multipart/form-data` request with the file under `file`.
pub fn multipart_request(uri: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
