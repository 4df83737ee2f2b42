//! # Availability Handler
//!
//! Public, unauthenticated projection of the slot store: only unclaimed
//! slots that have not started yet, soonest first. Claim state and booking
//! data never appear in this view.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use slotline_core::models::slot::{AvailabilityResponse, AvailableSlot};

use crate::{middleware::error_handling::AppError, ApiState};

/// Hard cap on the public page size.
pub const MAX_PUBLIC_LIMIT: i64 = 200;
/// Page size used when the client does not ask for one.
pub const DEFAULT_PUBLIC_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Maximum number of slots to return (clamped server-side)
    pub limit: Option<i64>,
}

/// Clamps a requested page size into the allowed range.
pub fn clamp_limit(requested: Option<i64>, default: i64, max: i64) -> i64 {
    requested.unwrap_or(default).clamp(1, max)
}

#[axum::debug_handler]
pub async fn list_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let limit = clamp_limit(query.limit, DEFAULT_PUBLIC_LIMIT, MAX_PUBLIC_LIMIT);
    let now = chrono::Utc::now();

    let slots = slotline_db::repositories::slot::list_available(&state.db_pool, now, limit).await?;

    let response = AvailabilityResponse {
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
    };

    Ok(Json(response))
}
