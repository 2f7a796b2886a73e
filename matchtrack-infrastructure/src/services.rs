pub mod activity_tracker;
pub mod bot_detector;
pub mod clickhouse_sink;
pub mod health_service;
pub mod http_sink;

pub use activity_tracker::*;
pub use bot_detector::*;
pub use clickhouse_sink::*;
pub use health_service::*;
pub use http_sink::*;
