use async_trait::async_trait;

use crate::entities::{TrackingEvent, UserMark};
use crate::value_objects::FraudType;

#[async_trait]
pub trait BotDetector: Send + Sync {
    async fn try_detect_clicker(&self, user_id: i64) -> anyhow::Result<Option<FraudType>>;
    async fn try_detect_woman_clicker_360(&self, user_id: i64) -> anyhow::Result<Option<FraudType>>;
}

/// Generic analytics sink.
#[async_trait]
pub trait EventPusher: Send + Sync {
    async fn push(&self, event: TrackingEvent) -> anyhow::Result<()>;
    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ActivityTracker: Send + Sync {
    async fn track_send_like(&self, sender_id: i64, receiver_id: i64) -> anyhow::Result<()>;
    async fn track_user_mark(&self, user_mark: &UserMark) -> anyhow::Result<()>;
}

#[async_trait]
pub trait HealthCheckService: Send + Sync {
    async fn check_event_sink(&self) -> anyhow::Result<bool>;
    async fn check_temp_store(&self) -> anyhow::Result<bool>;
}
