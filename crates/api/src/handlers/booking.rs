//! # Reservation Coordinator
//!
//! The booking protocol. Order matters and each failure short-circuits:
//!
//! 1. validate input, 2. fetch the slot, 3. pre-claim checks, 4. atomic
//! claim (the single serialization point), 5. meeting creation, 6. booking
//! persistence, 7. notification dispatch, 8. response.
//!
//! After step 4 succeeds this request owns the slot. Failures in steps 5-7
//! are reported to the caller but never roll back the claim or the booking:
//! a released claim could be re-taken while the first customer believes the
//! slot is theirs, so "never double-book" wins over tidiness and the admin
//! release operation handles cleanup.

use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use std::sync::Arc;

use slotline_core::errors::FunnelError;
use slotline_core::models::booking::{
    format_when, BookingInput, CreateBookingRequest, CreateBookingResponse, MIN_LEAD_SECONDS,
};
use slotline_core::models::meeting::{MeetingDetails, MeetingRequest};
use slotline_core::models::slot::duration_minutes;
use slotline_db::models::NewBooking;
use slotline_db::repositories::{booking, slot};
use slotline_integrations::mail::{EmailMessage, MailConfig};

use crate::middleware::error_handling::AppError;
use crate::ApiState;

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    // Step 1: validation, before any storage access.
    let input = payload
        .validate()
        .map_err(FunnelError::InvalidRequest)?;

    // Step 2: lookup.
    let found = slot::get_slot_by_id(&state.db_pool, input.slot_id).await?;
    let Some(db_slot) = found else {
        return Err(AppError(FunnelError::NotFound("Slot not found".to_string())));
    };

    // Step 3: pre-claim checks. The claim below re-checks atomically; this
    // just rejects the obvious cases without burning a claim attempt.
    if db_slot.claimed_at.is_some() {
        return Err(AppError(FunnelError::Conflict(
            "Slot already booked".to_string(),
        )));
    }
    let now = Utc::now();
    if db_slot.start_time < now + Duration::seconds(MIN_LEAD_SECONDS) {
        return Err(AppError(FunnelError::InvalidRequest(
            "Slot is too soon".to_string(),
        )));
    }

    // Derive the meeting length from the stored interval, never the client.
    let duration = duration_minutes(db_slot.start_time, db_slot.end_time);

    // Step 4: the atomic claim. Zero rows means a concurrent request won.
    let claimed = slot::claim_slot(&state.db_pool, db_slot.id, now).await?;
    if !claimed {
        return Err(AppError(FunnelError::Conflict(
            "Slot already booked".to_string(),
        )));
    }
    tracing::info!("slot {} claimed for {}", db_slot.id, input.customer_email);

    // Step 5: meeting creation. On failure the slot stays claimed; an
    // operator releases it manually if they want it rebookable.
    let meeting_request = MeetingRequest {
        start_time: db_slot.start_time,
        timezone: db_slot.timezone.clone(),
        duration_minutes: duration,
        topic: format!("Slotline call: {}", input.customer_name),
    };
    let meeting = state.meetings()?.create_meeting(&meeting_request).await?;

    // Step 6: booking persistence, denormalizing the slot's time fields.
    let new_booking = NewBooking {
        slot_id: db_slot.id,
        customer_name: input.customer_name.clone(),
        customer_email: input.customer_email.clone(),
        customer_phone: input.customer_phone.clone(),
        application_text: input.application_text.clone(),
        application_json: input.application_json.clone(),
        meeting_start_time: db_slot.start_time,
        meeting_timezone: db_slot.timezone.clone(),
        meeting_id: meeting.id.clone(),
        meeting_join_url: meeting.join_url.clone(),
        meeting_host_url: meeting.host_url.clone(),
        meeting_passcode: meeting.passcode.clone(),
    };
    let db_booking = booking::create_booking(&state.db_pool, &new_booking).await?;

    // Step 7: notification dispatch. The booking stands even if this fails;
    // the customer-visible truth must not be contradicted by a mail glitch.
    let when = format_when(db_slot.start_time, &db_slot.timezone);
    let (mail_config, mailer) = state.mail()?;
    let operator = operator_email(
        mail_config,
        &input,
        &meeting,
        &when,
        &db_slot.timezone,
        db_booking.id,
    );
    let customer = customer_email(mail_config, &input, &meeting, &when, &db_slot.timezone);
    mailer.send(&operator).await?;
    mailer.send(&customer).await?;

    // Step 8: response.
    Ok(Json(CreateBookingResponse {
        ok: true,
        booking_id: db_booking.id,
        when,
        timezone: db_slot.timezone,
        meeting_join_url: meeting.join_url,
    }))
}

/// Operator-facing notification: the full application narrative first, then
/// the booking and meeting details, with reply-to pointed at the customer.
pub fn operator_email(
    mail: &MailConfig,
    input: &BookingInput,
    meeting: &MeetingDetails,
    when: &str,
    timezone: &str,
    booking_id: uuid::Uuid,
) -> EmailMessage {
    let mut body = format!("{}\n\n--- Booking ---\n", input.application_text);
    body.push_str(&format!("When: {when}\n"));
    body.push_str(&format!("Timezone: {timezone}\n"));
    body.push_str(&format!("Name: {}\n", input.customer_name));
    body.push_str(&format!("Email: {}\n", input.customer_email));
    body.push_str(&format!("Phone: {}\n", input.customer_phone));
    body.push_str(&format!(
        "Meeting join: {}\n",
        meeting.join_url.as_deref().unwrap_or("")
    ));
    body.push_str(&format!(
        "Meeting host: {}\n",
        meeting.host_url.as_deref().unwrap_or("")
    ));
    body.push_str(&format!(
        "Meeting id: {}\n",
        meeting.id.as_deref().unwrap_or("")
    ));
    if let Some(passcode) = &meeting.passcode {
        body.push_str(&format!("Meeting passcode: {passcode}\n"));
    }
    body.push_str(&format!("Booking id: {booking_id}\n"));

    EmailMessage {
        to: mail.owner_to.clone(),
        from: mail.from.clone(),
        subject: format!("New booking: {} ({when})", input.customer_name),
        body,
        reply_to: Some(input.customer_email.clone()),
    }
}

/// Customer-facing confirmation: when, where, and how to join.
pub fn customer_email(
    mail: &MailConfig,
    input: &BookingInput,
    meeting: &MeetingDetails,
    when: &str,
    timezone: &str,
) -> EmailMessage {
    let mut body = format!(
        "Hi {},\n\nYour meeting is confirmed.\n\nWhen: {when}\nTimezone: {timezone}\n",
        input.customer_name
    );
    body.push_str(&format!(
        "Join link: {}\n",
        meeting.join_url.as_deref().unwrap_or("")
    ));
    if let Some(passcode) = &meeting.passcode {
        body.push_str(&format!("Passcode: {passcode}\n"));
    }
    body.push_str("\nSee you then.\n");

    EmailMessage {
        to: vec![input.customer_email.clone()],
        from: mail.from.clone(),
        subject: format!("Your meeting is booked ({when})"),
        body,
        reply_to: None,
    }
}
