use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::json;

use mindwell_audit::events::{Actor, AuditAction, AuditEvent};
use mindwell_core::error::CoreError;
use mindwell_core::models::booking::{Booking, BookingRequest, SlotAvailability, slots_for_day};
use mindwell_core::object_keys;
use mindwell_storage::error::StorageError;
use mindwell_storage::objects;
use mindwell_storage::state::{create_record, load_all, save_record};

use crate::error::ApiError;
use crate::routes::today_utc;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SlotQuery {
    pub date: jiff::civil::Date,
}

async fn claimed_slots(state: &AppState, date: jiff::civil::Date) -> Result<Vec<String>, ApiError> {
    let prefix = object_keys::booking_claims_prefix(date);
    let keys = objects::list_objects(&state.s3, &state.bucket, &prefix).await?;
    Ok(keys
        .iter()
        .filter_map(|k| object_keys::claimed_slot_id(k))
        .map(str::to_string)
        .collect())
}

pub async fn list_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Vec<SlotAvailability>>, ApiError> {
    let claimed = claimed_slots(&state, query.date).await?;
    Ok(Json(slots_for_day(&claimed)))
}

/// Book a counselor slot. The `(date, slot)` claim is written create-only,
/// so of two concurrent requests exactly one succeeds.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<Booking>, ApiError> {
    let claimed = claimed_slots(&state, req.date).await?;
    let booking = req.confirm(&claimed, today_utc(), jiff::Timestamp::now())?;

    let claim_key = object_keys::booking_claim(booking.date, &booking.slot_id);
    match create_record(&state.s3, &state.bucket, &claim_key, &booking.claim()).await {
        Ok(_) => {}
        Err(StorageError::AlreadyExists { .. }) => {
            return Err(CoreError::SlotUnavailable {
                date: booking.date,
                slot_id: booking.slot_id,
            }
            .into());
        }
        Err(e) => return Err(e.into()),
    }

    if let Err(e) = save_record(
        &state.s3,
        &state.bucket,
        &object_keys::booking(booking.id),
        &booking,
    )
    .await
    {
        if let Err(release) = objects::delete_object(&state.s3, &state.bucket, &claim_key).await {
            tracing::error!(key = %claim_key, error = %release, "failed to release slot claim");
        }
        return Err(e.into());
    }

    AuditEvent::new(
        AuditAction::BookingConfirmed,
        "booking",
        booking.id.to_string(),
        Actor::Anonymous,
    )
    .with_details(json!({
        "date": booking.date.to_string(),
        "slot_id": booking.slot_id,
        "mode": booking.mode,
    }))
    .emit();

    Ok(Json(booking))
}

/// All stored bookings, soonest first. Admin only.
pub async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, ApiError> {
    let mut bookings: Vec<Booking> =
        load_all(&state.s3, &state.bucket, object_keys::BOOKINGS_PREFIX).await?;
    bookings.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.slot_id.cmp(&b.slot_id)));
    Ok(Json(bookings))
}
