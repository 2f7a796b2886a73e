// Matchtrack Application Layer

pub mod commands;
pub mod dtos;
pub mod error;
pub mod metrics;
pub mod state;
pub mod tracker;

pub use error::AppError;
pub use metrics::Metrics;
pub use state::AppState;
pub use tracker::Tracker;
