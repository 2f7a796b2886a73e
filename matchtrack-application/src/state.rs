use std::sync::Arc;

use matchtrack_domain::ports::HealthCheckService;
use matchtrack_domain::RuntimeConfig;

use crate::{Metrics, Tracker};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub tracker: Arc<Tracker>,
    pub health_service: Arc<dyn HealthCheckService>,
    pub metrics: Arc<Metrics>,
}
