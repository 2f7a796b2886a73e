use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::info;

use matchtrack_domain::{current_millis, day_stamp, ClicksCounter, TempDataStore};

/// Shared Redis connection manager guarded by a Tokio mutex.
pub type SharedRedis = Arc<Mutex<ConnectionManager>>;

const KEY_PREFIX: &str = "matchtrack";
const CLICKS_TTL_SECONDS: u64 = 2 * 24 * 60 * 60;

pub async fn connect_redis(redis_url: &str) -> Result<SharedRedis> {
    let client = redis::Client::open(redis_url).context("failed to construct Redis client")?;
    let manager = ConnectionManager::new(client)
        .await
        .context("failed to initialize Redis connection manager")?;
    info!("redis connection established");
    Ok(Arc::new(Mutex::new(manager)))
}

fn temp_key(user_id: i64, key: &str) -> String {
    format!("{}:temp:{}:{}", KEY_PREFIX, user_id, key)
}

fn clicks_key(user_id: i64, day: &str) -> String {
    format!("{}:clicks:{}:{}", KEY_PREFIX, user_id, day)
}

pub struct RedisTempDataStore {
    redis: SharedRedis,
}

impl RedisTempDataStore {
    pub fn new(redis: SharedRedis) -> Self {
        Self { redis }
    }
}

fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

fn set_ex_cmd(key: &str, data: &str, ttl: Duration) -> redis::Cmd {
    let mut cmd = redis::cmd("SET");
    cmd.arg(key).arg(data).arg("EX").arg(ttl_seconds(ttl));
    cmd
}

fn set_nx_ex_cmd(key: &str, data: &str, ttl: Duration) -> redis::Cmd {
    let mut cmd = redis::cmd("SET");
    cmd.arg(key).arg(data).arg("NX").arg("EX").arg(ttl_seconds(ttl));
    cmd
}

/// `INCR` then `EXPIRE` in one transaction; only the new count is returned.
fn incr_with_expiry(key: &str, ttl_secs: u64) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .cmd("INCR")
        .arg(key)
        .cmd("EXPIRE")
        .arg(key)
        .arg(ttl_secs)
        .ignore();
    pipe
}

#[async_trait]
impl TempDataStore for RedisTempDataStore {
    async fn get_value(&self, user_id: i64, key: &str) -> anyhow::Result<Option<Value>> {
        let mut conn = self.redis.lock().await;
        let raw: Option<String> = conn.get(temp_key(user_id, key)).await?;
        let value = raw.map(|raw| decode_value(&raw));
        Ok(value)
    }

    async fn set(&self, user_id: i64, key: &str, value: Value, ttl: Duration) -> anyhow::Result<()> {
        let data = serde_json::to_string(&value)?;
        let mut conn = self.redis.lock().await;
        set_ex_cmd(&temp_key(user_id, key), &data, ttl)
            .query_async::<_, ()>(&mut *conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, user_id: i64, key: &str) -> anyhow::Result<()> {
        let mut conn = self.redis.lock().await;
        conn.del::<_, ()>(temp_key(user_id, key)).await?;
        Ok(())
    }

    async fn increment(&self, user_id: i64, key: &str, ttl: Duration) -> anyhow::Result<i64> {
        let mut conn = self.redis.lock().await;
        let (count,): (i64,) = incr_with_expiry(&temp_key(user_id, key), ttl_seconds(ttl))
            .query_async(&mut *conn)
            .await?;
        Ok(count)
    }

    async fn set_if_absent(
        &self,
        user_id: i64,
        key: &str,
        value: Value,
        ttl: Duration,
    ) -> anyhow::Result<bool> {
        let data = serde_json::to_string(&value)?;
        let mut conn = self.redis.lock().await;
        let stored: Option<String> = set_nx_ex_cmd(&temp_key(user_id, key), &data, ttl)
            .query_async(&mut *conn)
            .await?;
        Ok(stored.is_some())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let mut conn = self.redis.lock().await;
        redis::cmd("PING").query_async::<_, String>(&mut *conn).await?;
        Ok(())
    }
}

// Values written by other services may be bare strings rather than JSON.
fn decode_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub struct RedisClicksCounter {
    redis: SharedRedis,
}

impl RedisClicksCounter {
    pub fn new(redis: SharedRedis) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl ClicksCounter for RedisClicksCounter {
    async fn inc_clicks_per_day(&self, user_id: i64) -> anyhow::Result<u64> {
        let key = clicks_key(user_id, &day_stamp(current_millis()));
        let mut conn = self.redis.lock().await;
        let (count,): (u64,) = incr_with_expiry(&key, CLICKS_TTL_SECONDS)
            .query_async(&mut *conn)
            .await?;
        Ok(count)
    }

    async fn clicks_per_day(&self, user_id: i64) -> anyhow::Result<u64> {
        let key = clicks_key(user_id, &day_stamp(current_millis()));
        let mut conn = self.redis.lock().await;
        let count: Option<u64> = conn.get(key).await?;
        Ok(count.unwrap_or_default())
    }
}
