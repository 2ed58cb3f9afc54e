//! Domain layer - Core business logic with no framework dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (Message, SendMessage)
//! - Traits: Abstractions for infrastructure (MessageStore, Dispatcher)

pub mod entities;
pub mod traits;
