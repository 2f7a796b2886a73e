pub mod fraud_commands;
pub mod mark_commands;
pub mod pickup_commands;
pub mod priority_commands;

use crate::AppError;

pub(crate) fn require_id(value: i64, field: &str) -> Result<i64, AppError> {
    if value <= 0 {
        return Err(AppError::BadRequest(format!(
            "{} must be a positive id, got {}",
            field, value
        )));
    }
    Ok(value)
}

pub(crate) fn require_non_negative(value: i64, field: &str) -> Result<i64, AppError> {
    if value < 0 {
        return Err(AppError::BadRequest(format!(
            "{} must not be negative, got {}",
            field, value
        )));
    }
    Ok(value)
}
