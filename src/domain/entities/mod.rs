//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod message;

pub use command::SendMessage;
pub use message::{Message, MessageStatus};
