//! Send handler - turns a send command into a stored message

use std::sync::Arc;
use crate::domain::entities::{Message, MessageStatus, SendMessage};
use crate::domain::traits::MessageStore;
use crate::application::errors::StorageError;

/// Consumes `SendMessage` commands and persists them as sent messages
#[derive(Clone)]
pub struct SendMessageHandler {
    store: Arc<dyn MessageStore>,
}

impl SendMessageHandler {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Build a `sent` message from the command and store it.
    ///
    /// Not idempotent: handling the same command twice stores two messages
    /// with different uuids.
    pub async fn handle(&self, command: SendMessage) -> Result<Message, StorageError> {
        let message = Message::new(command.into_text()).with_status(MessageStatus::Sent);

        let preview: String = message.text.chars().take(50).collect();
        tracing::debug!("[{}] storing: {}", message.uuid, preview);

        let id = self.store.save(&message).await?;
        tracing::info!("Message {} stored as {}", message.uuid, message.status);

        Ok(message.with_id(id))
    }
}
