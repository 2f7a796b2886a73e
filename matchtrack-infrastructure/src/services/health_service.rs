use std::sync::Arc;

use async_trait::async_trait;
use matchtrack_domain::ports::{EventPusher, HealthCheckService, TempDataStore};

pub struct DefaultHealthService {
    event_pusher: Arc<dyn EventPusher>,
    temp_data: Arc<dyn TempDataStore>,
}

impl DefaultHealthService {
    pub fn new(event_pusher: Arc<dyn EventPusher>, temp_data: Arc<dyn TempDataStore>) -> Self {
        Self {
            event_pusher,
            temp_data,
        }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_event_sink(&self) -> anyhow::Result<bool> {
        self.event_pusher.ping().await.map(|_| true)
    }

    async fn check_temp_store(&self) -> anyhow::Result<bool> {
        self.temp_data.ping().await.map(|_| true)
    }
}
