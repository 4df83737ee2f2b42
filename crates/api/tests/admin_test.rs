mod common;

use chrono::{Duration, Utc};
use common::{open_slot, TestContext};
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use slotline_core::errors::{FunnelError, FunnelResult};
use slotline_core::models::slot::{
    slot_end, valid_duration, AdminSlot, CreateSlotRequest,
};
use slotline_db::models::DbSlot;

/// Mirrors the admin create handler over the mocked repository.
async fn run_create_slot(
    ctx: &TestContext,
    request: CreateSlotRequest,
) -> FunnelResult<AdminSlot> {
    if !valid_duration(request.duration_minutes) {
        return Err(FunnelError::InvalidRequest(
            "Invalid durationMinutes".to_string(),
        ));
    }

    if ctx
        .slot_repo
        .find_slot_by_start(request.start_time)
        .await?
        .is_some()
    {
        return Err(FunnelError::Conflict("Slot already exists".to_string()));
    }

    let end_time = slot_end(request.start_time, request.duration_minutes);
    let created = ctx
        .slot_repo
        .create_slot(request.start_time, end_time, "UTC")
        .await?;

    Ok(AdminSlot {
        id: created.id,
        start_time: created.start_time,
        end_time: created.end_time,
        timezone: created.timezone,
        claimed_at: created.claimed_at,
    })
}

fn create_request(duration_minutes: i64) -> CreateSlotRequest {
    CreateSlotRequest {
        start_time: Utc::now() + Duration::hours(2),
        timezone: Some("UTC".to_string()),
        duration_minutes,
    }
}

#[tokio::test]
async fn test_create_slot_with_valid_duration() {
    let mut ctx = TestContext::new();
    let request = create_request(30);
    let start = request.start_time;

    ctx.slot_repo
        .expect_find_slot_by_start()
        .with(predicate::eq(start))
        .times(1)
        .returning(|_| Ok(None));
    ctx.slot_repo
        .expect_create_slot()
        .withf(move |s, e, _| *s == start && *e == start + Duration::minutes(30))
        .times(1)
        .returning(|s, e, tz| {
            Ok(DbSlot {
                id: Uuid::new_v4(),
                start_time: s,
                end_time: e,
                timezone: tz.to_string(),
                claimed_at: None,
                created_at: Utc::now(),
            })
        });

    let slot = run_create_slot(&ctx, request).await.unwrap();
    assert_eq!(slot.end_time - slot.start_time, Duration::minutes(30));
    assert_eq!(slot.claimed_at, None);
}

#[tokio::test]
async fn test_create_slot_rejects_oversized_duration() {
    let ctx = TestContext::new();

    // 300 minutes exceeds the cap; storage is never touched.
    let err = run_create_slot(&ctx, create_request(300)).await.unwrap_err();
    assert!(matches!(err, FunnelError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_create_slot_rejects_undersized_duration() {
    let ctx = TestContext::new();

    let err = run_create_slot(&ctx, create_request(3)).await.unwrap_err();
    assert!(matches!(err, FunnelError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_create_duplicate_start_is_conflict() {
    let mut ctx = TestContext::new();
    let existing = open_slot();
    let mut request = create_request(30);
    request.start_time = existing.start_time;

    ctx.slot_repo
        .expect_find_slot_by_start()
        .times(1)
        .returning(move |_| Ok(Some(existing.clone())));

    let err = run_create_slot(&ctx, request).await.unwrap_err();
    assert!(matches!(err, FunnelError::Conflict(_)));
}

#[tokio::test]
async fn test_delete_unknown_slot_reports_success() {
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_delete_slot()
        .times(1)
        .returning(|_| Ok(()));

    // Deletion is idempotent: the repository call succeeds either way.
    ctx.slot_repo.delete_slot(Uuid::new_v4()).await.unwrap();
}

#[tokio::test]
async fn test_release_without_booking_clears_claim() {
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_release_slot()
        .times(1)
        .returning(|_| Ok(true));

    assert!(ctx.slot_repo.release_slot(Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn test_release_booked_slot_reports_not_released() {
    let mut ctx = TestContext::new();
    // The SQL guard refuses to release a slot that has a booking.
    ctx.slot_repo
        .expect_release_slot()
        .times(1)
        .returning(|_| Ok(false));

    assert!(!ctx.slot_repo.release_slot(Uuid::new_v4()).await.unwrap());
}
