use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shortest slot an operator may create, in minutes.
pub const MIN_SLOT_MINUTES: i64 = 5;
/// Longest slot an operator may create, in minutes.
pub const MAX_SLOT_MINUTES: i64 = 240;

/// A bookable time interval.
///
/// `claimed_at` is the claim state: `None` means the slot is open, a
/// timestamp means it was taken by a booking. The transition is one-way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub timezone: String,
    pub claimed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Public availability view of a slot. Claim state and booking data are
/// deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub ok: bool,
    pub slots: Vec<AvailableSlot>,
}

/// Operator view of a slot, including claim state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSlot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub timezone: String,
    pub claimed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSlotListResponse {
    pub ok: bool,
    pub slots: Vec<AdminSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlotRequest {
    pub start_time: DateTime<Utc>,
    pub timezone: Option<String>,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotResponse {
    pub ok: bool,
    pub slot: AdminSlot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteSlotResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseSlotResponse {
    pub ok: bool,
    pub released: bool,
}

/// Rounds a slot's length to whole minutes and clamps it to the bookable
/// range. Always derived from the stored interval, never from client input.
pub fn duration_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let seconds = (end - start).num_seconds();
    let rounded = (seconds as f64 / 60.0).round() as i64;
    rounded.clamp(MIN_SLOT_MINUTES, MAX_SLOT_MINUTES)
}

/// Returns true when a duration request is within the allowed bounds.
pub fn valid_duration(minutes: i64) -> bool {
    (MIN_SLOT_MINUTES..=MAX_SLOT_MINUTES).contains(&minutes)
}

/// End instant for a slot created with the given duration.
pub fn slot_end(start: DateTime<Utc>, duration: i64) -> DateTime<Utc> {
    start + Duration::minutes(duration)
}
