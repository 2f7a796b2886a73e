use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use matchtrack_domain::{
    current_millis, day_stamp, BotDetector, ClicksCounter, DetectorConfig, FraudType,
    TempDataStore, TTL_DAY,
};

const POSITIVE_MARKS_KEY: &str = "positive_marks";

/// Daily-limit detector.
///
/// A check fires once per user and day, on the first call that sees the count
/// over its limit. The once-per-day marker is claimed atomically in the temp
/// store, so callers racing past the limit still produce exactly one report.
/// A limit of 0 turns the check off.
pub struct ThresholdBotDetector {
    clicks: Arc<dyn ClicksCounter>,
    temp_data: Arc<dyn TempDataStore>,
    config: DetectorConfig,
}

impl ThresholdBotDetector {
    pub fn new(
        clicks: Arc<dyn ClicksCounter>,
        temp_data: Arc<dyn TempDataStore>,
        config: DetectorConfig,
    ) -> Self {
        Self {
            clicks,
            temp_data,
            config,
        }
    }

    async fn claim_daily_report(
        &self,
        user_id: i64,
        fraud_type: &FraudType,
        day: &str,
    ) -> anyhow::Result<bool> {
        let key = format!("reported_{}_{}", fraud_type, day);
        self.temp_data
            .set_if_absent(user_id, &key, Value::Bool(true), TTL_DAY)
            .await
    }
}

#[async_trait]
impl BotDetector for ThresholdBotDetector {
    async fn try_detect_clicker(&self, user_id: i64) -> anyhow::Result<Option<FraudType>> {
        let limit = self.config.clicker_daily_limit;
        if limit == 0 {
            return Ok(None);
        }
        let day = day_stamp(current_millis());
        let clicks = self.clicks.clicks_per_day(user_id).await?;
        if clicks <= limit {
            return Ok(None);
        }
        let fraud_type = FraudType::clicker();
        if !self.claim_daily_report(user_id, &fraud_type, &day).await? {
            return Ok(None);
        }
        warn!(user_id, clicks, limit, "daily click limit exceeded");
        Ok(Some(fraud_type))
    }

    async fn try_detect_woman_clicker_360(&self, user_id: i64) -> anyhow::Result<Option<FraudType>> {
        let limit = self.config.positive_mark_daily_limit;
        if limit == 0 {
            return Ok(None);
        }
        let day = day_stamp(current_millis());
        let key = format!("{}_{}", POSITIVE_MARKS_KEY, day);
        let marks = self.temp_data.increment(user_id, &key, TTL_DAY).await?;
        if u64::try_from(marks).unwrap_or_default() <= limit {
            return Ok(None);
        }
        let fraud_type = FraudType::woman_clicker_360();
        if !self.claim_daily_report(user_id, &fraud_type, &day).await? {
            return Ok(None);
        }
        warn!(user_id, marks, limit, "daily positive mark limit exceeded");
        Ok(Some(fraud_type))
    }
}
