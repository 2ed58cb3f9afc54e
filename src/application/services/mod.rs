//! Application services - Business logic orchestration

pub mod listing_service;

pub use listing_service::{ListingService, MessageView};
