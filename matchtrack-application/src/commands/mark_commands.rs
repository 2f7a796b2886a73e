use matchtrack_domain::UserMark;

use super::require_id;
use crate::dtos::SendLikeRequest;
use crate::{AppError, AppState};

pub async fn track_click_and_mark(state: &AppState, user_mark: UserMark) -> Result<(), AppError> {
    validate_user_mark(&user_mark)?;
    state.metrics.record_request();
    state.tracker.track_new_click_and_mark(&user_mark).await
}

pub async fn track_user_mark(state: &AppState, user_mark: UserMark) -> Result<(), AppError> {
    validate_user_mark(&user_mark)?;
    state.metrics.record_request();
    state.tracker.track_user_mark(&user_mark).await
}

pub async fn track_send_like(state: &AppState, payload: SendLikeRequest) -> Result<(), AppError> {
    let sender_id = require_id(payload.sender_id, "sender_id")?;
    let receiver_id = require_id(payload.receiver_id, "receiver_id")?;
    state.metrics.record_request();
    state.tracker.track_send_like(sender_id, receiver_id).await
}

fn validate_user_mark(user_mark: &UserMark) -> Result<(), AppError> {
    require_id(user_mark.sender.id, "sender.id")?;
    require_id(user_mark.receiver.id, "receiver.id")?;
    Ok(())
}
