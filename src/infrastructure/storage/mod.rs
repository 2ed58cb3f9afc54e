//! In-memory storage implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::traits::MessageStore;
use crate::domain::entities::Message;
use crate::application::errors::StorageError;

/// Volatile store kept in process memory
#[derive(Default)]
pub struct InMemoryStore {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn save(&self, message: &Message) -> Result<i64, StorageError> {
        let mut messages = self.messages.write().await;
        let id = i64::try_from(messages.len())
            .map_err(|e| StorageError::Unavailable(format!("Store full: {}", e)))?
            + 1;
        messages.push(message.clone().with_id(id));
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<Message>, StorageError> {
        let messages = self.messages.read().await;
        Ok(messages.clone())
    }

    async fn find_by_status(&self, status: &str) -> Result<Vec<Message>, StorageError> {
        let messages = self.messages.read().await;
        Ok(messages
            .iter()
            .filter(|m| m.status.as_str() == status)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MessageStatus;

    #[tokio::test]
    async fn starts_empty() {
        let store = InMemoryStore::new();
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn assigns_increasing_ids_in_insertion_order() {
        let store = InMemoryStore::new();
        let first = store.save(&Message::new("first")).await.unwrap();
        let second = store.save(&Message::new("second")).await.unwrap();

        assert!(second > first);
        let all = store.find_all().await.unwrap();
        assert_eq!(all[0].text, "first");
        assert_eq!(all[0].id, Some(first));
        assert_eq!(all[1].text, "second");
    }

    #[tokio::test]
    async fn filters_by_exact_status() {
        let store = InMemoryStore::new();
        store.save(&Message::new("p")).await.unwrap();
        store.save(&Message::new("s").with_status(MessageStatus::Sent)).await.unwrap();

        let sent = store.find_by_status("sent").await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].text, "s");
        assert!(store.find_by_status("'; DROP TABLE messages; --").await.unwrap().is_empty());
    }
}
