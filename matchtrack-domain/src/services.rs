pub mod pickup_event;

pub use pickup_event::*;
