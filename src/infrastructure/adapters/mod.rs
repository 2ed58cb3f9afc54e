//! Adapters - Transport integrations

pub mod http;
