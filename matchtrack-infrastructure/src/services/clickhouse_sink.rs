use anyhow::Result;
use async_trait::async_trait;
use clickhouse::Client;
use tracing::info;

use matchtrack_domain::{
    current_millis, millis_to_utc, DbConfig, EventEnvelope, EventPusher, TrackingEvent,
    TrackingEventRow,
};

#[derive(Clone)]
pub struct ClickhouseEventSink {
    client: Client,
    database: String,
    table: String,
}

impl ClickhouseEventSink {
    pub fn new(client: Client, database: String, table: String) -> Self {
        Self {
            client,
            database,
            table,
        }
    }

    pub fn from_config(config: &DbConfig) -> Self {
        let mut client = Client::default()
            .with_url(&config.clickhouse_url)
            .with_database(&config.clickhouse_database);
        if let Some(user) = &config.clickhouse_user {
            client = client.with_user(user);
        }
        if let Some(password) = &config.clickhouse_password {
            client = client.with_password(password);
        }
        Self::new(
            client,
            config.clickhouse_database.clone(),
            config.clickhouse_table.clone(),
        )
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        let create_db = format!("CREATE DATABASE IF NOT EXISTS {}", self.database);
        self.client.query(&create_db).execute().await?;
        self.client.query(&create_table_sql(&self.table)).execute().await?;
        info!(database = %self.database, table = %self.table, "tracking schema ready");
        Ok(())
    }
}

fn create_table_sql(table: &str) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {} (
    event_time DateTime64(3),
    event_id String,
    event_name LowCardinality(String),
    user_id Int64,
    payload_json String
) ENGINE = MergeTree
PARTITION BY toYYYYMM(event_time)
ORDER BY (event_name, event_time, user_id)
TTL toDateTime(event_time) + INTERVAL 180 DAY
"#,
        table
    )
}

pub fn envelope_to_row(envelope: &EventEnvelope) -> Result<TrackingEventRow> {
    Ok(TrackingEventRow {
        event_time: millis_to_utc(envelope.occurred_at_ms),
        event_id: envelope.event_id.to_string(),
        event_name: envelope.name.clone(),
        user_id: envelope.user_id,
        payload_json: serde_json::to_string(&envelope.payload)?,
    })
}

#[async_trait]
impl EventPusher for ClickhouseEventSink {
    async fn push(&self, event: TrackingEvent) -> anyhow::Result<()> {
        let envelope = EventEnvelope::wrap(&event, current_millis())?;
        let row = envelope_to_row(&envelope)?;
        let mut insert = self.client.insert(&self.table)?;
        insert.write(&row).await?;
        insert.end().await?;
        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let _: u8 = self.client.query("SELECT toUInt8(1)").fetch_one().await?;
        Ok(())
    }
}
