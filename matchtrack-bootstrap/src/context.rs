use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::warn;

use matchtrack_application::{AppState, Metrics, Tracker};
use matchtrack_domain::{ClicksCounter, EventPusher, TempDataStore};
use matchtrack_infrastructure::{
    connect_redis, AppConfig, ClickhouseEventSink, DefaultHealthService, EventActivityTracker,
    EventSinkKind, FileGeoDirectory, HttpEventSink, MemoryClicksCounter, MemoryTempDataStore,
    RedisClicksCounter, RedisTempDataStore, ThresholdBotDetector,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();

        let event_pusher = build_event_pusher(config).await?;
        let (temp_data, clicks) = build_stores(config).await?;
        let geo = Arc::new(FileGeoDirectory::load(&config.cities_path).await?);

        let bot_detector = Arc::new(ThresholdBotDetector::new(
            clicks.clone(),
            temp_data.clone(),
            config.to_detector_config(),
        ));
        let activity_tracker = Arc::new(EventActivityTracker::new(event_pusher.clone()));
        let metrics = Arc::new(Metrics::default());

        let tracker = Tracker::new(
            activity_tracker,
            bot_detector,
            clicks,
            temp_data.clone(),
            event_pusher.clone(),
            geo,
        )
        .with_metrics(metrics.clone());

        let state = AppState {
            config: runtime_config,
            tracker: Arc::new(tracker),
            health_service: Arc::new(DefaultHealthService::new(event_pusher, temp_data)),
            metrics,
        };

        Ok(Self { state })
    }
}

async fn build_event_pusher(config: &AppConfig) -> Result<Arc<dyn EventPusher>> {
    match config.sink_kind()? {
        EventSinkKind::Clickhouse => {
            let sink = ClickhouseEventSink::from_config(&config.to_db_config());
            sink.ensure_schema().await?;
            let sink: Arc<dyn EventPusher> = Arc::new(sink);
            Ok(sink)
        }
        EventSinkKind::Http => {
            let url = config
                .event_webhook_url
                .clone()
                .ok_or_else(|| anyhow!("event_webhook_url not configured"))?;
            let sink = HttpEventSink::new(
                url,
                config.event_webhook_secret.clone(),
                config.request_timeout_seconds,
            )?;
            let sink: Arc<dyn EventPusher> = Arc::new(sink);
            Ok(sink)
        }
    }
}

async fn build_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn TempDataStore>, Arc<dyn ClicksCounter>)> {
    match &config.redis_url {
        Some(url) => {
            let redis = connect_redis(url).await?;
            let temp_data: Arc<dyn TempDataStore> = Arc::new(RedisTempDataStore::new(redis.clone()));
            let clicks: Arc<dyn ClicksCounter> = Arc::new(RedisClicksCounter::new(redis));
            Ok((temp_data, clicks))
        }
        None => {
            warn!("redis_url not configured, counters are kept in process memory");
            let temp_data: Arc<dyn TempDataStore> = Arc::new(MemoryTempDataStore::new());
            let clicks: Arc<dyn ClicksCounter> = Arc::new(MemoryClicksCounter::new());
            Ok((temp_data, clicks))
        }
    }
}
