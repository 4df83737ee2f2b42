mod common;

use chrono::Utc;
use common::{claimed_slot, open_slot, TestContext};
use pretty_assertions::assert_eq;
use rstest::rstest;

use slotline_api::handlers::availability::{
    clamp_limit, DEFAULT_PUBLIC_LIMIT, MAX_PUBLIC_LIMIT,
};
use slotline_core::models::slot::{AvailabilityResponse, AvailableSlot};

#[rstest]
#[case(None, 50)]
#[case(Some(1), 1)]
#[case(Some(120), 120)]
#[case(Some(0), 1)]
#[case(Some(-5), 1)]
#[case(Some(10_000), 200)]
fn test_public_limit_clamping(#[case] requested: Option<i64>, #[case] expected: i64) {
    assert_eq!(
        clamp_limit(requested, DEFAULT_PUBLIC_LIMIT, MAX_PUBLIC_LIMIT),
        expected
    );
}

/// Mirrors the availability projection over the mocked repository.
async fn run_availability(ctx: &TestContext, limit: i64) -> eyre::Result<AvailabilityResponse> {
    let slots = ctx.slot_repo.list_available(Utc::now(), limit).await?;
    Ok(AvailabilityResponse {
        ok: true,
        slots: slots
            .into_iter()
            .map(|slot| AvailableSlot {
                id: slot.id,
                start_time: slot.start_time,
                end_time: slot.end_time,
                timezone: slot.timezone,
            })
            .collect(),
    })
}

#[tokio::test]
async fn test_availability_projection_has_no_claim_state() {
    let mut ctx = TestContext::new();
    let slot = open_slot();
    let listed = slot.clone();
    ctx.slot_repo
        .expect_list_available()
        .times(1)
        .returning(move |_, _| Ok(vec![listed.clone()]));

    let response = run_availability(&ctx, 50).await.unwrap();

    assert!(response.ok);
    assert_eq!(response.slots.len(), 1);
    assert_eq!(response.slots[0].id, slot.id);
    assert_eq!(response.slots[0].timezone, "UTC");

    // The serialized public view carries only the four announced fields.
    let value = serde_json::to_value(&response.slots[0]).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 4);
    assert!(value.get("claimedAt").is_none());
}

#[tokio::test]
async fn test_availability_excludes_claimed_slots_once_committed() {
    let mut ctx = TestContext::new();
    // The repository query filters on claimed_at IS NULL; once a claim
    // commits, the slot no longer appears in what the store returns.
    let _booked = claimed_slot();
    ctx.slot_repo
        .expect_list_available()
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let response = run_availability(&ctx, 50).await.unwrap();
    assert!(response.slots.is_empty());
}
