use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outbound request for a time-boxed video meeting room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRequest {
    pub start_time: DateTime<Utc>,
    pub timezone: String,
    pub duration_minutes: i64,
    pub topic: String,
}

/// What the meeting provider gave back. Every field is optional: a provider
/// may omit any of them and the booking proceeds with what it has.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetingDetails {
    pub id: Option<String>,
    pub join_url: Option<String>,
    pub host_url: Option<String>,
    pub passcode: Option<String>,
}

/// Maps a provider string field to `None` when it is empty or missing, so
/// placeholder empty strings never reach storage.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
