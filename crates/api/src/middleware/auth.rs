//! # Admin Auth Gate
//!
//! Every admin operation is guarded by a single shared operator credential
//! pair presented over HTTP Basic auth. Two failure shapes are
//! distinguished on purpose: missing server-side credentials are a
//! deployment problem (`NotConfigured`, 500), while missing or wrong client
//! credentials are `Unauthorized` (401 with a challenge header so browser
//! clients re-prompt).

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use base64::{engine::general_purpose::STANDARD, Engine};
use slotline_core::errors::{FunnelError, FunnelResult};

use crate::config::AdminCredentials;

/// Extracts the username/password pair from a `Basic` Authorization
/// header, if one is present and well-formed.
pub fn basic_auth_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let encoded = value
        .strip_prefix("Basic ")
        .or_else(|| value.strip_prefix("basic "))?
        .trim();

    let decoded = STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

/// Checks the request's credentials against the configured operator pair.
pub fn require_admin(
    headers: &HeaderMap,
    admin: Option<&AdminCredentials>,
) -> FunnelResult<()> {
    let Some(admin) = admin else {
        return Err(FunnelError::NotConfigured(
            "Admin auth not configured".to_string(),
        ));
    };

    match basic_auth_credentials(headers) {
        Some((username, password))
            if username.trim() == admin.username && password == admin.password =>
        {
            Ok(())
        }
        _ => Err(FunnelError::Unauthorized),
    }
}
