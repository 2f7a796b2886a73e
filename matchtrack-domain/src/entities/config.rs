// Runtime configuration handed from infrastructure to the other layers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
    pub clickhouse_table: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DetectorConfig {
    /// 0 disables the check.
    pub clicker_daily_limit: u64,
    /// 0 disables the check.
    pub positive_mark_daily_limit: u64,
}
