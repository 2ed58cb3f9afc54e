//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Database: SQLite persistence
//! - Storage: In-memory persistence
//! - Adapters: Transport integrations (HTTP)

pub mod config;
pub mod database;
pub mod storage;
pub mod adapters;
