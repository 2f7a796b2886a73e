use matchtrack_domain::FraudType;

use super::require_id;
use crate::dtos::FraudRequest;
use crate::{AppError, AppState};

pub async fn track_fraud(state: &AppState, payload: FraudRequest) -> Result<(), AppError> {
    let user_id = require_id(payload.user_id, "user_id")?;
    let fraud_type = FraudType::new(payload.fraud_type)
        .ok_or_else(|| AppError::BadRequest("fraud_type must not be empty".to_string()))?;
    state.metrics.record_request();
    state.tracker.track_fraud(user_id, fraud_type).await
}
