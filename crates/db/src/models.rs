use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub timezone: String,
    pub claimed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub slot_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub application_text: String,
    pub application_json: Option<serde_json::Value>,
    pub meeting_start_time: DateTime<Utc>,
    pub meeting_timezone: String,
    pub meeting_id: Option<String>,
    pub meeting_join_url: Option<String>,
    pub meeting_host_url: Option<String>,
    pub meeting_passcode: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a booking record.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub slot_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub application_text: String,
    pub application_json: Option<serde_json::Value>,
    pub meeting_start_time: DateTime<Utc>,
    pub meeting_timezone: String,
    pub meeting_id: Option<String>,
    pub meeting_join_url: Option<String>,
    pub meeting_host_url: Option<String>,
    pub meeting_passcode: Option<String>,
}
