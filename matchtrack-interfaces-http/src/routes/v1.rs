use axum::routing::{get, post};
use axum::Router;

use matchtrack_application::AppState;

use crate::handlers::{ops_handlers, track_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/track/mark", post(track_handlers::track_mark))
        .route("/v1/track/user-mark", post(track_handlers::track_user_mark))
        .route("/v1/track/like", post(track_handlers::track_like))
        .route("/v1/track/fraud", post(track_handlers::track_fraud))
        .route("/v1/track/pickup", post(track_handlers::track_pickup))
        .route(
            "/v1/track/pickup-deleted",
            post(track_handlers::track_pickup_deleted),
        )
        .route(
            "/v1/track/pickup-matches",
            post(track_handlers::track_pickup_matches),
        )
        .route(
            "/v1/track/priority-time",
            post(track_handlers::track_priority_time),
        )
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route("/v1/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
