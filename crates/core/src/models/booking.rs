use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A booking request will be rejected when the slot starts less than this
/// many seconds in the future.
pub const MIN_LEAD_SECONDS: i64 = 60;

/// Booking submission from the public funnel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub slot_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub application_text: String,
    #[serde(default)]
    pub application_json: Option<serde_json::Value>,
}

/// The validated, trimmed form of a booking request.
#[derive(Debug, Clone)]
pub struct BookingInput {
    pub slot_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub application_text: String,
    pub application_json: Option<serde_json::Value>,
}

impl CreateBookingRequest {
    /// Trims all text fields and checks required-field and email-syntax
    /// constraints. Returns the cleaned input or the first violation found.
    pub fn validate(&self) -> Result<BookingInput, String> {
        let customer_name = self.customer_name.trim().to_string();
        let customer_email = self.customer_email.trim().to_string();
        let customer_phone = self.customer_phone.trim().to_string();
        let application_text = self.application_text.trim().to_string();

        if customer_name.is_empty()
            || customer_email.is_empty()
            || customer_phone.is_empty()
            || application_text.is_empty()
        {
            return Err("Missing fields".to_string());
        }
        if !is_valid_email(&customer_email) {
            return Err("Invalid email".to_string());
        }

        Ok(BookingInput {
            slot_id: self.slot_id,
            customer_name,
            customer_email,
            customer_phone,
            application_text,
            application_json: self.application_json.clone(),
        })
    }
}

/// The durable record of a completed reservation. The slot's start time and
/// timezone are copied in so the record survives slot deletion; meeting
/// fields stay `None` when the provider omitted them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub ok: bool,
    pub booking_id: Uuid,
    pub when: String,
    pub timezone: String,
    pub meeting_join_url: Option<String>,
}

/// Minimal syntactic email check: one `@`, no whitespace, and a dot in the
/// domain part.
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Renders a slot's start as a long date plus short time in its own
/// timezone, e.g. "Monday 2 March 2026, 14:30". Falls back to RFC 3339 when
/// the stored zone label does not parse.
pub fn format_when(start: DateTime<Utc>, timezone: &str) -> String {
    match timezone.parse::<Tz>() {
        Ok(tz) => start
            .with_timezone(&tz)
            .format("%A %-d %B %Y, %H:%M")
            .to_string(),
        Err(_) => start.to_rfc3339(),
    }
}
