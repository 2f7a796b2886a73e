use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::Instant;

use matchtrack_domain::{current_millis, day_stamp, ClicksCounter, TempDataStore};

struct TempEntry {
    value: Value,
    expires_at: Instant,
}

/// Process-local temp data, used when no Redis is configured.
#[derive(Default)]
pub struct MemoryTempDataStore {
    entries: RwLock<HashMap<(i64, String), TempEntry>>,
}

impl MemoryTempDataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TempDataStore for MemoryTempDataStore {
    async fn get_value(&self, user_id: i64, key: &str) -> anyhow::Result<Option<Value>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&(user_id, key.to_string()))
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, user_id: i64, key: &str, value: Value, ttl: Duration) -> anyhow::Result<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            (user_id, key.to_string()),
            TempEntry {
                value,
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, user_id: i64, key: &str) -> anyhow::Result<()> {
        self.entries.write().await.remove(&(user_id, key.to_string()));
        Ok(())
    }

    async fn increment(&self, user_id: i64, key: &str, ttl: Duration) -> anyhow::Result<i64> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let entry_key = (user_id, key.to_string());
        let current = match entries.get(&entry_key) {
            Some(entry) if entry.expires_at > now => match entry.value.as_i64() {
                Some(value) => value,
                None => anyhow::bail!("value at {} is not an integer", key),
            },
            _ => 0,
        };
        let next = current + 1;
        entries.insert(
            entry_key,
            TempEntry {
                value: Value::from(next),
                expires_at: now + ttl,
            },
        );
        Ok(next)
    }

    async fn set_if_absent(
        &self,
        user_id: i64,
        key: &str,
        value: Value,
        ttl: Duration,
    ) -> anyhow::Result<bool> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let entry_key = (user_id, key.to_string());
        if entries
            .get(&entry_key)
            .is_some_and(|entry| entry.expires_at > now)
        {
            return Ok(false);
        }
        entries.insert(
            entry_key,
            TempEntry {
                value,
                expires_at: now + ttl,
            },
        );
        Ok(true)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Per-user click counts for the current UTC day.
#[derive(Default)]
pub struct MemoryClicksCounter {
    counts: RwLock<HashMap<(i64, String), u64>>,
}

impl MemoryClicksCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClicksCounter for MemoryClicksCounter {
    async fn inc_clicks_per_day(&self, user_id: i64) -> anyhow::Result<u64> {
        let day = day_stamp(current_millis());
        let mut counts = self.counts.write().await;
        counts.retain(|(_, counted_day), _| *counted_day == day);
        let count = counts.entry((user_id, day)).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn clicks_per_day(&self, user_id: i64) -> anyhow::Result<u64> {
        let day = day_stamp(current_millis());
        Ok(self
            .counts
            .read()
            .await
            .get(&(user_id, day))
            .copied()
            .unwrap_or_default())
    }
}
