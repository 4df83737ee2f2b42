//! # Admin Slot Manager
//!
//! Authenticated create/list/delete over the slot store, plus a manual
//! release operation for claims that never produced a booking. Every
//! handler checks the auth gate before touching storage.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use slotline_core::errors::FunnelError;
use slotline_core::models::slot::{
    slot_end, valid_duration, AdminSlot, AdminSlotListResponse, CreateSlotRequest,
    CreateSlotResponse, DeleteSlotResponse, ReleaseSlotResponse,
};
use slotline_db::models::DbSlot;
use slotline_db::repositories::slot;

use crate::handlers::availability::clamp_limit;
use crate::middleware::error_handling::{storage_error, AppError};
use crate::middleware::auth;
use crate::ApiState;

/// Hard cap on the admin page size.
pub const MAX_ADMIN_LIMIT: i64 = 500;
/// Admin page size used when none is requested.
pub const DEFAULT_ADMIN_LIMIT: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    pub limit: Option<i64>,
}

fn admin_slot(slot: DbSlot) -> AdminSlot {
    AdminSlot {
        id: slot.id,
        start_time: slot.start_time,
        end_time: slot.end_time,
        timezone: slot.timezone,
        claimed_at: slot.claimed_at,
    }
}

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<AdminSlotListResponse>, AppError> {
    auth::require_admin(&headers, state.admin.as_ref())?;

    let limit = clamp_limit(query.limit, DEFAULT_ADMIN_LIMIT, MAX_ADMIN_LIMIT);
    let slots = slot::list_upcoming(&state.db_pool, Utc::now(), limit).await?;

    Ok(Json(AdminSlotListResponse {
        ok: true,
        slots: slots.into_iter().map(admin_slot).collect(),
    }))
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateSlotRequest>,
) -> Result<(StatusCode, Json<CreateSlotResponse>), AppError> {
    auth::require_admin(&headers, state.admin.as_ref())?;

    if !valid_duration(payload.duration_minutes) {
        return Err(AppError(FunnelError::InvalidRequest(
            "Invalid durationMinutes".to_string(),
        )));
    }

    let timezone = payload
        .timezone
        .as_deref()
        .map(str::trim)
        .filter(|tz| !tz.is_empty())
        .unwrap_or("UTC")
        .to_string();
    let end_time = slot_end(payload.start_time, payload.duration_minutes);

    // Cheap pre-check for a duplicate start; the unique index still decides
    // under concurrent creates.
    let existing = slot::find_slot_by_start(&state.db_pool, payload.start_time)
        .await
        .map_err(storage_error)?;
    if existing.is_some() {
        return Err(AppError(FunnelError::Conflict(
            "Slot already exists".to_string(),
        )));
    }

    let created = slot::create_slot(&state.db_pool, payload.start_time, end_time, &timezone)
        .await
        .map_err(|report| {
            if slotline_db::is_unique_violation(&report) {
                FunnelError::Conflict("Slot already exists".to_string())
            } else {
                storage_error(report)
            }
        })?;

    tracing::info!("admin created slot {} at {}", created.id, created.start_time);

    Ok((
        StatusCode::CREATED,
        Json(CreateSlotResponse {
            ok: true,
            slot: admin_slot(created),
        }),
    ))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteSlotResponse>, AppError> {
    auth::require_admin(&headers, state.admin.as_ref())?;

    // Idempotent: deleting an unknown id reports success. Any booking goes
    // with the slot via the FK cascade.
    slot::delete_slot(&state.db_pool, id).await?;
    tracing::info!("admin deleted slot {id}");

    Ok(Json(DeleteSlotResponse { ok: true }))
}

#[axum::debug_handler]
pub async fn release_slot(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<ReleaseSlotResponse>, AppError> {
    auth::require_admin(&headers, state.admin.as_ref())?;

    // Only claims without a booking can be released; a booked slot stays
    // claimed until the slot itself is deleted.
    let released = slot::release_slot(&state.db_pool, id).await?;
    if released {
        tracing::info!("admin released stuck claim on slot {id}");
    }

    Ok(Json(ReleaseSlotResponse { ok: true, released }))
}
