// Event envelope
// Transport wrapper that sinks persist or forward

use clickhouse::Row;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::TrackingEvent;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: Uuid,
    pub name: String,
    pub user_id: i64,
    pub occurred_at_ms: i64,
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    pub fn wrap(event: &TrackingEvent, occurred_at_ms: i64) -> anyhow::Result<Self> {
        Ok(Self {
            event_id: Uuid::new_v4(),
            name: event.name().to_string(),
            user_id: event.user_id(),
            occurred_at_ms,
            payload: serde_json::to_value(event)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Row)]
pub struct TrackingEventRow {
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    pub event_time: OffsetDateTime,
    pub event_id: String,
    pub event_name: String,
    pub user_id: i64,
    pub payload_json: String,
}
