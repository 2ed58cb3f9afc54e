//! Message handling - Send command dispatch and processing

pub mod dispatcher;
pub mod handler;

pub use dispatcher::{QueueDispatcher, SyncDispatcher};
pub use handler::SendMessageHandler;
