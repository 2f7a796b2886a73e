use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use matchtrack_infrastructure::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "matchtrack")]
#[command(about = "Matches analytics tracker", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Override the listen address from the config file
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("MATCHTRACK_CONFIG", config);
    }
    if let Some(bind) = args.bind {
        std::env::set_var("MATCHTRACK_BIND_ADDR", bind);
    }

    let config = AppConfig::load().await?;
    let _log_guard = matchtrack_bootstrap::telemetry::init_tracing(&config);

    match &config.loaded_from {
        Some(path) => info!(path = %path, "config loaded"),
        None => warn!("config.toml not found, using defaults"),
    }
    info!(
        event_sink = %config.event_sink,
        clickhouse_url = %config.clickhouse_url,
        clickhouse_database = %config.clickhouse_database,
        redis_configured = config.redis_url.is_some(),
        cities_path = %config.cities_path,
        "tracker settings"
    );

    matchtrack_bootstrap::run_standalone(config).await
}
