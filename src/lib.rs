//! Message board backend
//!
//! Accepts text messages over HTTP, dispatches them to a send handler that
//! stores them as `sent`, and lists them back with an optional status filter.

pub mod domain;
pub mod application;
pub mod infrastructure;
