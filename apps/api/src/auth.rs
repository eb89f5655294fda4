//! # Authentication
//!
//! Username/password check against the users table, and the header gate
//! used by cost-revealing endpoints.
//!
//! ## Scope
//! Tokens are opaque placeholders: nothing signs them and nothing verifies
//! them later. The `Authorization` gate only checks that a header is
//! present. Roles are reported to the client but not enforced.

use axum::http::{header, HeaderMap};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use mtc_core::User;
use mtc_db::password::verify_password;
use mtc_db::Database;

/// Prefix of issued tokens, so they are recognizable in logs.
pub const TOKEN_PREFIX: &str = "mvp-token-";

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Verifies a username/password pair.
///
/// Unknown users, wrong passwords and inactive users all fail with the same
/// message.
pub async fn authenticate(db: &Database, username: &str, password: &str) -> ApiResult<User> {
    let Some(user) = db.users().get_by_username(username.trim()).await? else {
        debug!(username = %username, "Login for unknown user");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(password, &user.password_hash) {
        debug!(username = %username, "Login with wrong password");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    if !user.is_active {
        info!(username = %username, "Login for inactive user");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    Ok(user)
}

/// Issues a placeholder session token.
pub fn issue_token() -> String {
    format!("{}{}", TOKEN_PREFIX, Uuid::new_v4())
}

/// Returns the `Authorization` header value, or 401 when it is missing or blank.
pub fn require_authorization(headers: &HeaderMap) -> ApiResult<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::unauthorized("Missing token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use axum::http::HeaderValue;
    use mtc_core::UserRole;
    use mtc_db::DbConfig;

    async fn db_with_user() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.users()
            .create("admin", "s3cret", UserRole::Admin, Some("Store Admin"))
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let db = db_with_user().await;
        let user = authenticate(&db, "admin", "s3cret").await.unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.display_name(), "Store Admin");
    }

    #[tokio::test]
    async fn test_authenticate_failures_look_alike() {
        let db = db_with_user().await;

        let wrong = authenticate(&db, "admin", "nope").await.unwrap_err();
        let unknown = authenticate(&db, "ghost", "s3cret").await.unwrap_err();

        assert_eq!(wrong.code, ErrorCode::Unauthorized);
        assert_eq!(wrong.message, unknown.message);
    }

    #[tokio::test]
    async fn test_inactive_user_rejected() {
        let db = db_with_user().await;
        let user = db.users().get_by_username("admin").await.unwrap().unwrap();
        db.users().set_active(&user.id, false).await.unwrap();

        let err = authenticate(&db, "admin", "s3cret").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn test_issue_token() {
        let a = issue_token();
        assert!(a.starts_with(TOKEN_PREFIX));
        assert_ne!(a, issue_token());
    }

    #[test]
    fn test_require_authorization() {
        let mut headers = HeaderMap::new();
        assert!(require_authorization(&headers).is_err());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("   "));
        assert!(require_authorization(&headers).is_err());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(require_authorization(&headers).unwrap(), "Bearer abc");
    }
}
