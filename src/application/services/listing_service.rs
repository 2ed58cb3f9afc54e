use std::sync::Arc;
use serde::Serialize;
use crate::domain::entities::Message;
use crate::domain::traits::MessageStore;
use crate::application::errors::StorageError;

/// Public projection of a message; internal id and timestamps stay hidden
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    pub uuid: String,
    pub text: String,
    pub status: String,
}

impl From<Message> for MessageView {
    fn from(message: Message) -> Self {
        Self {
            uuid: message.uuid.to_string(),
            text: message.text,
            status: message.status.as_str().to_string(),
        }
    }
}

/// Service for reading messages back out of the store
#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn MessageStore>,
}

impl ListingService {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// List messages, filtered by status when a non-empty filter is given.
    ///
    /// An empty filter is the same as no filter.
    pub async fn list(&self, status_filter: Option<&str>) -> Result<Vec<MessageView>, StorageError> {
        let messages = match status_filter.filter(|s| !s.is_empty()) {
            Some(status) => {
                tracing::debug!("Listing messages with status {:?}", status);
                self.store.find_by_status(status).await?
            }
            None => self.store.find_all().await?,
        };

        Ok(messages.into_iter().map(MessageView::from).collect())
    }
}
