//! Message dispatchers - Route send commands to the handler

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use crate::domain::entities::SendMessage;
use crate::domain::traits::Dispatcher;
use crate::application::errors::DispatchError;
use super::handler::SendMessageHandler;

/// Handles each command inline, before `dispatch` returns
pub struct SyncDispatcher {
    handler: SendMessageHandler,
}

impl SyncDispatcher {
    pub fn new(handler: SendMessageHandler) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl Dispatcher for SyncDispatcher {
    async fn dispatch(&self, command: SendMessage) -> Result<(), DispatchError> {
        self.handler.handle(command).await?;
        Ok(())
    }
}

/// Queues commands on an in-process channel drained by one worker task
pub struct QueueDispatcher {
    sender: mpsc::UnboundedSender<SendMessage>,
}

impl QueueDispatcher {
    /// Start the worker and return the dispatcher feeding it.
    ///
    /// The worker exits once every `QueueDispatcher` clone is dropped and the
    /// queue is drained, so awaiting the handle waits for pending sends.
    pub fn spawn(handler: SendMessageHandler) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(handler, receiver));
        (Self { sender }, worker)
    }
}

#[async_trait]
impl Dispatcher for QueueDispatcher {
    async fn dispatch(&self, command: SendMessage) -> Result<(), DispatchError> {
        self.sender
            .send(command)
            .map_err(|_| DispatchError::QueueClosed)?;
        tracing::debug!("Send command queued");
        Ok(())
    }
}

async fn run_worker(handler: SendMessageHandler, mut receiver: mpsc::UnboundedReceiver<SendMessage>) {
    tracing::info!("Send worker started");

    while let Some(command) = receiver.recv().await {
        // No retry: a failed send is logged and dropped
        if let Err(e) = handler.handle(command).await {
            tracing::error!("Failed to handle send command: {}", e);
        }
    }

    tracing::info!("Send worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use async_trait::async_trait;
    use crate::application::errors::StorageError;
    use crate::domain::entities::{Message, MessageStatus};
    use crate::domain::traits::MessageStore;
    use crate::infrastructure::storage::InMemoryStore;

    struct UnreachableStore;

    #[async_trait]
    impl MessageStore for UnreachableStore {
        async fn save(&self, _message: &Message) -> Result<i64, StorageError> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }

        async fn find_all(&self) -> Result<Vec<Message>, StorageError> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }

        async fn find_by_status(&self, _status: &str) -> Result<Vec<Message>, StorageError> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn sync_dispatch_persists_before_returning() {
        let store = Arc::new(InMemoryStore::new());
        let dispatcher = SyncDispatcher::new(SendMessageHandler::new(store.clone()));

        dispatcher.dispatch(SendMessage::new("now").unwrap()).await.unwrap();

        let stored = store.find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].text, "now");
        assert_eq!(stored[0].status, MessageStatus::Sent);
    }

    #[tokio::test]
    async fn sync_dispatch_surfaces_storage_failure() {
        let dispatcher = SyncDispatcher::new(SendMessageHandler::new(Arc::new(UnreachableStore)));

        let result = dispatcher.dispatch(SendMessage::new("lost").unwrap()).await;

        assert!(matches!(
            result,
            Err(DispatchError::Handler(StorageError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn queued_commands_are_each_handled_once() {
        let store = Arc::new(InMemoryStore::new());
        let (dispatcher, worker) = QueueDispatcher::spawn(SendMessageHandler::new(store.clone()));

        for text in ["one", "two", "three"] {
            dispatcher.dispatch(SendMessage::new(text).unwrap()).await.unwrap();
        }
        drop(dispatcher);
        worker.await.unwrap();

        let mut texts: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.text)
            .collect();
        texts.sort();
        assert_eq!(texts, vec!["one", "three", "two"]);
    }

    #[tokio::test]
    async fn queue_worker_survives_storage_failure() {
        let (dispatcher, worker) =
            QueueDispatcher::spawn(SendMessageHandler::new(Arc::new(UnreachableStore)));

        assert!(dispatcher.dispatch(SendMessage::new("a").unwrap()).await.is_ok());
        assert!(dispatcher.dispatch(SendMessage::new("b").unwrap()).await.is_ok());

        drop(dispatcher);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn dispatch_fails_once_worker_is_gone() {
        let store = Arc::new(InMemoryStore::new());
        let (dispatcher, worker) = QueueDispatcher::spawn(SendMessageHandler::new(store));

        worker.abort();
        let _ = worker.await;

        let result = dispatcher.dispatch(SendMessage::new("late").unwrap()).await;
        assert!(matches!(result, Err(DispatchError::QueueClosed)));
    }
}
