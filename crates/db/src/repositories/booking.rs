use crate::models::{DbBooking, NewBooking};
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_booking(pool: &Pool<Postgres>, new: &NewBooking) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (
            id, slot_id,
            customer_name, customer_email, customer_phone,
            application_text, application_json,
            meeting_start_time, meeting_timezone,
            meeting_id, meeting_join_url, meeting_host_url, meeting_passcode,
            created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING
            id, slot_id,
            customer_name, customer_email, customer_phone,
            application_text, application_json,
            meeting_start_time, meeting_timezone,
            meeting_id, meeting_join_url, meeting_host_url, meeting_passcode,
            created_at
        "#,
    )
    .bind(id)
    .bind(new.slot_id)
    .bind(&new.customer_name)
    .bind(&new.customer_email)
    .bind(&new.customer_phone)
    .bind(&new.application_text)
    .bind(&new.application_json)
    .bind(new.meeting_start_time)
    .bind(&new.meeting_timezone)
    .bind(&new.meeting_id)
    .bind(&new.meeting_join_url)
    .bind(&new.meeting_host_url)
    .bind(&new.meeting_passcode)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(booking)
}
