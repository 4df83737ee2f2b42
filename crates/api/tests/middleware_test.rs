use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use base64::{engine::general_purpose::STANDARD, Engine};
use pretty_assertions::assert_eq;

use slotline_api::config::AdminCredentials;
use slotline_api::middleware::auth::{basic_auth_credentials, require_admin};
use slotline_api::middleware::error_handling::AppError;
use slotline_core::errors::FunnelError;

fn admin() -> AdminCredentials {
    AdminCredentials {
        username: "operator".to_string(),
        password: "hunter2".to_string(),
    }
}

fn basic_header(username: &str, password: &str) -> HeaderMap {
    let encoded = STANDARD.encode(format!("{username}:{password}"));
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Basic {encoded}")).unwrap(),
    );
    headers
}

#[test]
fn test_auth_gate_accepts_matching_credentials() {
    let headers = basic_header("operator", "hunter2");
    assert!(require_admin(&headers, Some(&admin())).is_ok());
}

#[test]
fn test_auth_gate_rejects_wrong_password() {
    let headers = basic_header("operator", "wrong");
    let err = require_admin(&headers, Some(&admin())).unwrap_err();
    assert!(matches!(err, FunnelError::Unauthorized));
}

#[test]
fn test_auth_gate_rejects_missing_header() {
    let headers = HeaderMap::new();
    let err = require_admin(&headers, Some(&admin())).unwrap_err();
    assert!(matches!(err, FunnelError::Unauthorized));
}

#[test]
fn test_auth_gate_distinguishes_missing_server_config() {
    // Operators need to see a setup problem, not an auth problem.
    let headers = basic_header("operator", "hunter2");
    let err = require_admin(&headers, None).unwrap_err();
    assert!(matches!(err, FunnelError::NotConfigured(_)));
}

#[test]
fn test_basic_credentials_parse_password_with_colon() {
    let headers = basic_header("operator", "pa:ss:word");
    let (username, password) = basic_auth_credentials(&headers).unwrap();
    assert_eq!(username, "operator");
    assert_eq!(password, "pa:ss:word");
}

#[test]
fn test_basic_credentials_reject_malformed_header() {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic not!base64"));
    assert!(basic_auth_credentials(&headers).is_none());

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer token"));
    assert!(basic_auth_credentials(&headers).is_none());
}

#[test]
fn test_error_status_mapping() {
    let cases = vec![
        (
            FunnelError::InvalidRequest("bad".to_string()),
            StatusCode::BAD_REQUEST,
        ),
        (
            FunnelError::NotFound("missing".to_string()),
            StatusCode::NOT_FOUND,
        ),
        (
            FunnelError::Conflict("taken".to_string()),
            StatusCode::CONFLICT,
        ),
        (FunnelError::Unauthorized, StatusCode::UNAUTHORIZED),
        (
            FunnelError::NotConfigured("no admin".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            FunnelError::Upstream("zoom down".to_string()),
            StatusCode::BAD_GATEWAY,
        ),
        (FunnelError::SchemaMissing, StatusCode::INTERNAL_SERVER_ERROR),
        (
            FunnelError::Storage(eyre::eyre!("connection refused")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        let response = AppError(error).into_response();
        assert_eq!(response.status(), expected);
    }
}

#[test]
fn test_unauthorized_response_carries_challenge_header() {
    let response = AppError(FunnelError::Unauthorized).into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(WWW_AUTHENTICATE).unwrap(),
        "Basic realm=\"Admin\""
    );
}

#[tokio::test]
async fn test_storage_error_body_is_generic() {
    let response = AppError(FunnelError::Storage(eyre::eyre!(
        "password authentication failed for user postgres"
    )))
    .into_response();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["ok"], false);
    // The low-level cause is logged, never surfaced.
    assert_eq!(body["error"], "Storage unavailable");
}
