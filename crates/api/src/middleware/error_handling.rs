//! # Error Handling Middleware
//!
//! Maps the shared `FunnelError` taxonomy to HTTP responses. Every failure
//! becomes a `{ok:false, error}` JSON body with a stable status code;
//! storage detail is logged here and never forwarded to the client.

use axum::{
    http::{header::WWW_AUTHENTICATE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotline_core::errors::FunnelError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps `FunnelError` and implements `IntoResponse`, so
/// handlers can use `?` on anything convertible into the taxonomy.
#[derive(Debug)]
pub struct AppError(pub FunnelError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            FunnelError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            FunnelError::NotFound(_) => StatusCode::NOT_FOUND,
            FunnelError::Conflict(_) => StatusCode::CONFLICT,
            FunnelError::Unauthorized => StatusCode::UNAUTHORIZED,
            FunnelError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FunnelError::Upstream(_) => StatusCode::BAD_GATEWAY,
            FunnelError::SchemaMissing => StatusCode::INTERNAL_SERVER_ERROR,
            FunnelError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let FunnelError::Storage(report) = &self.0 {
            tracing::error!("storage failure: {report:?}");
        }

        let body = Json(json!({ "ok": false, "error": self.0.to_string() }));

        if matches!(self.0, FunnelError::Unauthorized) {
            // Challenge header so browser clients re-prompt for credentials.
            return (status, [(WWW_AUTHENTICATE, "Basic realm=\"Admin\"")], body)
                .into_response();
        }

        (status, body).into_response()
    }
}

/// Automatic conversion from FunnelError to AppError, enabling `?` in
/// handlers.
impl From<FunnelError> for AppError {
    fn from(err: FunnelError) -> Self {
        AppError(err)
    }
}

/// Classifies a repository error: a missing table is the operator-visible
/// "schema not provisioned" condition, anything else is opaque storage
/// failure.
pub fn storage_error(report: eyre::Report) -> FunnelError {
    if slotline_db::is_schema_missing(&report) {
        FunnelError::SchemaMissing
    } else {
        FunnelError::Storage(report)
    }
}

impl From<eyre::Report> for AppError {
    fn from(report: eyre::Report) -> Self {
        AppError(storage_error(report))
    }
}
