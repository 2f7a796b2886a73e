use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;

use matchtrack_domain::{DbConfig, DetectorConfig, RuntimeConfig};

use super::validation::{validate_table_name, EventSinkKind};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub event_sink: String,
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
    pub clickhouse_table: String,
    pub event_webhook_url: Option<String>,
    pub event_webhook_secret: Option<String>,
    pub redis_url: Option<String>,
    pub cities_path: String,
    pub clicker_daily_limit: u64,
    pub positive_mark_daily_limit: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub log_dir: Option<String>,
    pub log_json: bool,
    /// Path the config was read from; `None` when defaults were used.
    #[serde(skip)]
    pub loaded_from: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            event_sink: "clickhouse".to_string(),
            clickhouse_url: "http://127.0.0.1:8123".to_string(),
            clickhouse_database: "matchtrack".to_string(),
            clickhouse_user: None,
            clickhouse_password: None,
            clickhouse_table: "tracking_events".to_string(),
            event_webhook_url: None,
            event_webhook_secret: None,
            redis_url: None,
            cities_path: "./cities.yaml".to_string(),
            clicker_daily_limit: 1000,
            positive_mark_daily_limit: 360,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 10,
            log_dir: None,
            log_json: false,
            loaded_from: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("MATCHTRACK_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            let mut config: AppConfig = toml::from_str(&content)?;
            config.loaded_from = Some(path.clone());
            config
        } else {
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        self.api_token = non_blank(self.api_token.take());
        self.clickhouse_user = non_blank(self.clickhouse_user.take());
        self.clickhouse_password = non_blank(self.clickhouse_password.take());
        self.event_webhook_url = non_blank(self.event_webhook_url.take());
        self.event_webhook_secret = non_blank(self.event_webhook_secret.take());
        self.redis_url = non_blank(self.redis_url.take());
        self.log_dir = non_blank(self.log_dir.take());
        self.event_sink = self.event_sink.trim().to_lowercase();
        self.clickhouse_table = self.clickhouse_table.trim().to_string();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.cities_path = resolve_path(base, &self.cities_path);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        match self.sink_kind()? {
            EventSinkKind::Clickhouse => validate_table_name(&self.clickhouse_table)?,
            EventSinkKind::Http => {
                if self.event_webhook_url.is_none() {
                    return Err(anyhow!("event_sink 'http' requires event_webhook_url"));
                }
            }
        }
        Ok(())
    }

    pub fn sink_kind(&self) -> Result<EventSinkKind> {
        self.event_sink.parse()
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            clickhouse_url: self.clickhouse_url.clone(),
            clickhouse_database: self.clickhouse_database.clone(),
            clickhouse_user: self.clickhouse_user.clone(),
            clickhouse_password: self.clickhouse_password.clone(),
            clickhouse_table: self.clickhouse_table.clone(),
        }
    }

    pub fn to_detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            clicker_daily_limit: self.clicker_daily_limit,
            positive_mark_daily_limit: self.positive_mark_daily_limit,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("MATCHTRACK_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("MATCHTRACK_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("MATCHTRACK_EVENT_SINK") {
            self.event_sink = value;
        }
        if let Ok(value) = env::var("MATCHTRACK_CLICKHOUSE_URL") {
            self.clickhouse_url = value;
        }
        if let Ok(value) = env::var("MATCHTRACK_CLICKHOUSE_DATABASE") {
            self.clickhouse_database = value;
        }
        if let Ok(value) = env::var("MATCHTRACK_CLICKHOUSE_USER") {
            self.clickhouse_user = Some(value);
        }
        if let Ok(value) = env::var("MATCHTRACK_CLICKHOUSE_PASSWORD") {
            self.clickhouse_password = Some(value);
        }
        if let Ok(value) = env::var("MATCHTRACK_CLICKHOUSE_TABLE") {
            self.clickhouse_table = value;
        }
        if let Ok(value) = env::var("MATCHTRACK_EVENT_WEBHOOK_URL") {
            self.event_webhook_url = Some(value);
        }
        if let Ok(value) = env::var("MATCHTRACK_EVENT_WEBHOOK_SECRET") {
            self.event_webhook_secret = Some(value);
        }
        if let Ok(value) = env::var("MATCHTRACK_REDIS_URL") {
            self.redis_url = Some(value);
        }
        if let Ok(value) = env::var("MATCHTRACK_CITIES_PATH") {
            self.cities_path = value;
        }
        if let Ok(value) = env::var("MATCHTRACK_CLICKER_DAILY_LIMIT") {
            self.clicker_daily_limit = value.parse().unwrap_or(self.clicker_daily_limit);
        }
        if let Ok(value) = env::var("MATCHTRACK_POSITIVE_MARK_DAILY_LIMIT") {
            self.positive_mark_daily_limit =
                value.parse().unwrap_or(self.positive_mark_daily_limit);
        }
        if let Ok(value) = env::var("MATCHTRACK_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("MATCHTRACK_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("MATCHTRACK_LOG_DIR") {
            self.log_dir = Some(value);
        }
        if let Ok(value) = env::var("MATCHTRACK_LOG_JSON") {
            self.log_json = value.parse().unwrap_or(self.log_json);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
