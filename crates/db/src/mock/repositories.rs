use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbBooking, DbSlot, NewBooking};

// Mock repositories for testing
mock! {
    pub SlotRepo {
        pub async fn create_slot(
            &self,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
            timezone: &'static str,
        ) -> eyre::Result<DbSlot>;

        pub async fn get_slot_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbSlot>>;

        pub async fn find_slot_by_start(
            &self,
            start_time: DateTime<Utc>,
        ) -> eyre::Result<Option<DbSlot>>;

        pub async fn list_available(
            &self,
            now: DateTime<Utc>,
            limit: i64,
        ) -> eyre::Result<Vec<DbSlot>>;

        pub async fn list_upcoming(
            &self,
            now: DateTime<Utc>,
            limit: i64,
        ) -> eyre::Result<Vec<DbSlot>>;

        pub async fn claim_slot(
            &self,
            id: Uuid,
            now: DateTime<Utc>,
        ) -> eyre::Result<bool>;

        pub async fn release_slot(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;

        pub async fn delete_slot(
            &self,
            id: Uuid,
        ) -> eyre::Result<()>;
    }
}

mock! {
    pub BookingRepo {
        pub async fn create_booking(
            &self,
            new: NewBooking,
        ) -> eyre::Result<DbBooking>;
    }
}
