//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Read-side use cases (message listing)
//! - Errors: Domain-specific errors
//! - Messaging: Send command dispatching and handling

pub mod errors;
pub mod services;
pub mod messaging;
