// Domain entities

pub mod config;
pub mod envelope;
pub mod geo;
pub mod tracking_event;
pub mod user;

pub use config::*;
pub use envelope::*;
pub use geo::*;
pub use tracking_event::*;
pub use user::*;
