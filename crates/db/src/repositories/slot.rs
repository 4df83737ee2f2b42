use crate::models::DbSlot;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_slot(
    pool: &Pool<Postgres>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    timezone: &str,
) -> Result<DbSlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        INSERT INTO slots (id, start_time, end_time, timezone, claimed_at, created_at)
        VALUES ($1, $2, $3, $4, NULL, $5)
        RETURNING id, start_time, end_time, timezone, claimed_at, created_at
        "#,
    )
    .bind(id)
    .bind(start_time)
    .bind(end_time)
    .bind(timezone)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(slot)
}

pub async fn get_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSlot>> {
    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, start_time, end_time, timezone, claimed_at, created_at
        FROM slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn find_slot_by_start(
    pool: &Pool<Postgres>,
    start_time: DateTime<Utc>,
) -> Result<Option<DbSlot>> {
    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, start_time, end_time, timezone, claimed_at, created_at
        FROM slots
        WHERE start_time = $1
        "#,
    )
    .bind(start_time)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

/// Unclaimed future slots for the public availability view.
pub async fn list_available(
    pool: &Pool<Postgres>,
    now: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, start_time, end_time, timezone, claimed_at, created_at
        FROM slots
        WHERE claimed_at IS NULL AND start_time >= $1
        ORDER BY start_time ASC
        LIMIT $2
        "#,
    )
    .bind(now)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

/// All slots that have not yet ended, claimed or not, for operator
/// visibility.
pub async fn list_upcoming(
    pool: &Pool<Postgres>,
    now: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, start_time, end_time, timezone, claimed_at, created_at
        FROM slots
        WHERE end_time >= $1
        ORDER BY start_time ASC
        LIMIT $2
        "#,
    )
    .bind(now)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

/// Atomically transitions a slot from unclaimed to claimed.
///
/// The WHERE clause makes the store the authority on first-claimant-wins:
/// the update only lands when `claimed_at` is still NULL, so of any number
/// of concurrent callers exactly one sees `true`.
pub async fn claim_slot(pool: &Pool<Postgres>, id: Uuid, now: DateTime<Utc>) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE slots
        SET claimed_at = $2
        WHERE id = $1 AND claimed_at IS NULL
        "#,
    )
    .bind(id)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Clears a stuck claim: one that was taken but never produced a booking
/// (the meeting or insert step failed after the claim landed). A slot with
/// a booking is never released this way.
pub async fn release_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE slots
        SET claimed_at = NULL
        WHERE id = $1
          AND claimed_at IS NOT NULL
          AND NOT EXISTS (SELECT 1 FROM bookings WHERE bookings.slot_id = $1)
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Deletes a slot and, via the FK cascade, any booking that references it.
/// Deleting an id that does not exist is not an error.
pub async fn delete_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}
