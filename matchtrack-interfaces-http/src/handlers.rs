pub mod ops_handlers;
pub mod track_handlers;

pub use ops_handlers::*;
pub use track_handlers::*;
