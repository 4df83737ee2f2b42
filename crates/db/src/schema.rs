use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create slots table. The unique start_time backs the duplicate-slot
    // invariant; claimed_at NULL means the slot is still open.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            start_time TIMESTAMP WITH TIME ZONE NOT NULL UNIQUE,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            timezone VARCHAR(64) NOT NULL DEFAULT 'UTC',
            claimed_at TIMESTAMP WITH TIME ZONE NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table. Slot time and timezone are denormalized so the
    // record outlives its slot; the cascade removes it on slot deletion.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            slot_id UUID NOT NULL REFERENCES slots(id) ON DELETE CASCADE,
            customer_name TEXT NOT NULL,
            customer_email TEXT NOT NULL,
            customer_phone TEXT NOT NULL,
            application_text TEXT NOT NULL,
            application_json JSONB NULL,
            meeting_start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            meeting_timezone VARCHAR(64) NOT NULL,
            meeting_id TEXT NULL,
            meeting_join_url TEXT NULL,
            meeting_host_url TEXT NULL,
            meeting_passcode TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_slots_start_time ON slots(start_time)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_slots_claimed_at ON slots(claimed_at)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_bookings_slot_id ON bookings(slot_id)")
        .execute(pool)
        .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
