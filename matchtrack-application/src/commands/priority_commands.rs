use super::{require_id, require_non_negative};
use crate::dtos::PriorityTimeRequest;
use crate::{AppError, AppState};

pub async fn track_priority_time(
    state: &AppState,
    payload: PriorityTimeRequest,
) -> Result<(), AppError> {
    let user_id = require_id(payload.user_id, "user_id")?;
    let count_list = require_non_negative(payload.count_list, "count_list")?;
    let execute_time = require_non_negative(payload.execute_time, "execute_time")?;
    state.metrics.record_request();
    state
        .tracker
        .track_priority_execute_time(user_id, count_list, execute_time)
        .await
}
