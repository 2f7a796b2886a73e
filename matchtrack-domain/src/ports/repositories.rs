use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::entities::City;

pub const TTL_DAY: Duration = Duration::from_secs(24 * 60 * 60);
pub const TTL_MONTH: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Short-lived per-user values, namespaced by key.
#[async_trait]
pub trait TempDataStore: Send + Sync {
    async fn get_value(&self, user_id: i64, key: &str) -> anyhow::Result<Option<Value>>;
    async fn set(&self, user_id: i64, key: &str, value: Value, ttl: Duration) -> anyhow::Result<()>;
    async fn delete(&self, user_id: i64, key: &str) -> anyhow::Result<()>;
    /// Atomically adds one to an integer value and refreshes its ttl.
    /// Returns the value after incrementing.
    async fn increment(&self, user_id: i64, key: &str, ttl: Duration) -> anyhow::Result<i64>;
    /// Stores `value` only when no live value exists. Returns whether it was stored.
    async fn set_if_absent(
        &self,
        user_id: i64,
        key: &str,
        value: Value,
        ttl: Duration,
    ) -> anyhow::Result<bool>;
    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ClicksCounter: Send + Sync {
    /// Returns the count after incrementing.
    async fn inc_clicks_per_day(&self, user_id: i64) -> anyhow::Result<u64>;
    async fn clicks_per_day(&self, user_id: i64) -> anyhow::Result<u64>;
}

#[async_trait]
pub trait GeoDirectory: Send + Sync {
    async fn city_by_id(&self, city_id: i64) -> anyhow::Result<Option<City>>;
}
