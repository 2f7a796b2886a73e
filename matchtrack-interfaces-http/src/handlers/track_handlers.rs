use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

use matchtrack_application::commands::{
    fraud_commands, mark_commands, pickup_commands, priority_commands,
};
use matchtrack_application::dtos::{
    FraudRequest, PickupDeletedRequest, PickupMatchesRequest, PickupRequest, PriorityTimeRequest,
    SendLikeRequest,
};
use matchtrack_application::AppState;
use matchtrack_domain::UserMark;

use crate::error::HttpError;
use crate::middleware::{authorize, parse_payload};

fn decode<T: DeserializeOwned>(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<T, HttpError> {
    if !authorize(&state.config, headers) {
        return Err(HttpError::Unauthorized);
    }
    parse_payload(headers, body, state.config.max_body_bytes).map_err(|err| {
        warn!("failed to parse tracking body: {}", err);
        HttpError::BadRequest(err.to_string())
    })
}

pub async fn track_mark(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, HttpError> {
    let payload: UserMark = decode(&state, &headers, &body)?;
    mark_commands::track_click_and_mark(&state, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn track_user_mark(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, HttpError> {
    let payload: UserMark = decode(&state, &headers, &body)?;
    mark_commands::track_user_mark(&state, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn track_like(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, HttpError> {
    let payload: SendLikeRequest = decode(&state, &headers, &body)?;
    mark_commands::track_send_like(&state, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn track_fraud(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, HttpError> {
    let payload: FraudRequest = decode(&state, &headers, &body)?;
    fraud_commands::track_fraud(&state, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn track_pickup(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, HttpError> {
    let payload: PickupRequest = decode(&state, &headers, &body)?;
    pickup_commands::track_pickup(&state, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn track_pickup_deleted(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, HttpError> {
    let payload: PickupDeletedRequest = decode(&state, &headers, &body)?;
    pickup_commands::track_pickup_deleted(&state, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn track_pickup_matches(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, HttpError> {
    let payload: PickupMatchesRequest = decode(&state, &headers, &body)?;
    pickup_commands::track_pickup_matches(&state, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn track_priority_time(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, HttpError> {
    let payload: PriorityTimeRequest = decode(&state, &headers, &body)?;
    priority_commands::track_priority_time(&state, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}
