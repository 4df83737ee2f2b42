use async_trait::async_trait;
use chrono::{Duration, Utc};
use mockall::mock;
use uuid::Uuid;

use slotline_core::errors::FunnelResult;
use slotline_core::models::booking::CreateBookingRequest;
use slotline_core::models::meeting::{MeetingDetails, MeetingRequest};
use slotline_db::mock::repositories::{MockBookingRepo, MockSlotRepo};
use slotline_db::models::{DbBooking, DbSlot};
use slotline_integrations::mail::{EmailMessage, Mailer};
use slotline_integrations::meetings::MeetingProvider;

mock! {
    pub Meetings {}

    #[async_trait]
    impl MeetingProvider for Meetings {
        async fn create_meeting(&self, request: &MeetingRequest) -> FunnelResult<MeetingDetails>;
    }
}

mock! {
    pub Mail {}

    #[async_trait]
    impl Mailer for Mail {
        async fn send(&self, message: &EmailMessage) -> FunnelResult<()>;
    }
}

/// Mocked collaborators for exercising handler logic without a database or
/// network.
pub struct TestContext {
    pub slot_repo: MockSlotRepo,
    pub booking_repo: MockBookingRepo,
    pub meetings: MockMeetings,
    pub mailer: MockMail,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            slot_repo: MockSlotRepo::new(),
            booking_repo: MockBookingRepo::new(),
            meetings: MockMeetings::new(),
            mailer: MockMail::new(),
        }
    }
}

/// An unclaimed 45-minute slot starting two hours from now.
pub fn open_slot() -> DbSlot {
    let start = Utc::now() + Duration::hours(2);
    DbSlot {
        id: Uuid::new_v4(),
        start_time: start,
        end_time: start + Duration::minutes(45),
        timezone: "UTC".to_string(),
        claimed_at: None,
        created_at: Utc::now(),
    }
}

pub fn claimed_slot() -> DbSlot {
    DbSlot {
        claimed_at: Some(Utc::now()),
        ..open_slot()
    }
}

pub fn booking_request(slot_id: Uuid) -> CreateBookingRequest {
    CreateBookingRequest {
        slot_id,
        customer_name: "Ada Lovelace".to_string(),
        customer_email: "ada@example.com".to_string(),
        customer_phone: "+44 20 7946 0000".to_string(),
        application_text: "We need help with our data pipeline.".to_string(),
        application_json: None,
    }
}

pub fn meeting_details() -> MeetingDetails {
    MeetingDetails {
        id: Some("987654321".to_string()),
        join_url: Some("https://zoom.example/j/987654321".to_string()),
        host_url: Some("https://zoom.example/s/987654321".to_string()),
        passcode: Some("letmein".to_string()),
    }
}

pub fn stored_booking(slot: &DbSlot, details: &MeetingDetails) -> DbBooking {
    DbBooking {
        id: Uuid::new_v4(),
        slot_id: slot.id,
        customer_name: "Ada Lovelace".to_string(),
        customer_email: "ada@example.com".to_string(),
        customer_phone: "+44 20 7946 0000".to_string(),
        application_text: "We need help with our data pipeline.".to_string(),
        application_json: None,
        meeting_start_time: slot.start_time,
        meeting_timezone: slot.timezone.clone(),
        meeting_id: details.id.clone(),
        meeting_join_url: details.join_url.clone(),
        meeting_host_url: details.host_url.clone(),
        meeting_passcode: details.passcode.clone(),
        created_at: Utc::now(),
    }
}

/// Builds a slot with an arbitrary start offset from now, for lead-time
/// tests.
pub fn slot_starting_in(offset: Duration) -> DbSlot {
    let start = Utc::now() + offset;
    DbSlot {
        start_time: start,
        end_time: start + Duration::minutes(30),
        ..open_slot()
    }
}
