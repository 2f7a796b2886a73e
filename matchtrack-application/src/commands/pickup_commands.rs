use super::require_id;
use crate::dtos::{PickupDeletedRequest, PickupMatchesRequest, PickupRequest};
use crate::{AppError, AppState};

pub async fn track_pickup(state: &AppState, payload: PickupRequest) -> Result<(), AppError> {
    let user_id = require_id(payload.user_id, "user_id")?;
    state.metrics.record_request();
    state
        .tracker
        .pickup_user_tracking(user_id, payload.found_user_id)
        .await
}

pub async fn track_pickup_deleted(
    state: &AppState,
    payload: PickupDeletedRequest,
) -> Result<(), AppError> {
    let user_id = require_id(payload.user_id, "user_id")?;
    require_id(payload.contact.id, "contact.id")?;
    state.metrics.record_request();
    state
        .tracker
        .pickup_deleted_user_tracking(user_id, &payload.contact, payload.attempt)
        .await
}

pub async fn track_pickup_matches(
    state: &AppState,
    payload: PickupMatchesRequest,
) -> Result<(), AppError> {
    require_id(payload.user.id, "user.id")?;
    if let Some(contact) = &payload.contact {
        require_id(contact.id, "contact.id")?;
    }
    state.metrics.record_request();
    state
        .tracker
        .track_pickup_matches_user(&payload.user, payload.contact.as_ref(), payload.is_pickup)
        .await
}
