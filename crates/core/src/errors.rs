use thiserror::Error;

/// Errors surfaced by the booking funnel.
///
/// Every failure a handler can report maps onto exactly one of these
/// variants; the api crate translates them into HTTP statuses. Storage
/// detail is carried for logging but is never forwarded to clients.
#[derive(Error, Debug)]
pub enum FunnelError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Server not configured: {0}")]
    NotConfigured(String),

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Database schema not provisioned (run db-migrate)")]
    SchemaMissing,

    #[error("Storage unavailable")]
    Storage(#[from] eyre::Report),
}

pub type FunnelResult<T> = Result<T, FunnelError>;
