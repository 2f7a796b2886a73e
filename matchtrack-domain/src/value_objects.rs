// Domain value objects
pub mod fraud_type;
pub mod gender;
pub mod mark;

pub use fraud_type::*;
pub use gender::*;
pub use mark::*;
