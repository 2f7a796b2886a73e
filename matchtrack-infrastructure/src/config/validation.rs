use std::str::FromStr;

use anyhow::{anyhow, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSinkKind {
    Clickhouse,
    Http,
}

impl FromStr for EventSinkKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "clickhouse" => Ok(EventSinkKind::Clickhouse),
            "http" => Ok(EventSinkKind::Http),
            other => Err(anyhow!(
                "unknown event_sink '{}', expected 'clickhouse' or 'http'",
                other
            )),
        }
    }
}

/// Table names are interpolated into DDL, so only plain identifiers pass.
pub fn validate_table_name(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("clickhouse_table is empty"));
    }
    let valid = value
        .chars()
        .enumerate()
        .all(|(idx, ch)| ch == '_' || ch.is_ascii_alphabetic() || (idx > 0 && ch.is_ascii_digit()));
    if !valid {
        return Err(anyhow!("clickhouse_table '{}' is not a plain identifier", value));
    }
    Ok(())
}
