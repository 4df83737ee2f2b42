pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// True when the report wraps a Postgres "undefined table" error (42P01),
/// meaning the schema was never provisioned. Operators get a dedicated
/// message for this instead of a generic storage failure.
pub fn is_schema_missing(report: &eyre::Report) -> bool {
    matches!(
        report.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(db)) if db.code().as_deref() == Some("42P01")
    )
}

/// True when the report wraps a Postgres unique violation (23505). Used to
/// classify a duplicate slot start that slipped past the pre-check.
pub fn is_unique_violation(report: &eyre::Report) -> bool {
    matches!(
        report.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(db)) if db.code().as_deref() == Some("23505")
    )
}
