// Collaborator Port Traits (Interfaces)
// Define what the tracker needs from infrastructure

pub mod repositories;
pub mod services;

pub use repositories::*;
pub use services::*;
