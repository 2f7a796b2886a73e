pub mod geo_file;
pub mod memory_store;
pub mod redis_store;

pub use geo_file::*;
pub use memory_store::*;
pub use redis_store::*;
