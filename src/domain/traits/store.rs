use async_trait::async_trait;
use crate::application::errors::StorageError;
use crate::domain::entities::Message;

/// Store trait - abstraction for message persistence
///
/// Implementations own the persisted records. Each `save` is atomic and
/// isolated; nothing here spans more than one record.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a new message and return the internal id assigned to it
    async fn save(&self, message: &Message) -> Result<i64, StorageError>;

    /// All messages, in whatever order the backend keeps them
    async fn find_all(&self) -> Result<Vec<Message>, StorageError>;

    /// Messages whose status equals `status` exactly.
    ///
    /// The value is always bound as data, never spliced into a query, so an
    /// unknown or hostile value just matches nothing.
    async fn find_by_status(&self, status: &str) -> Result<Vec<Message>, StorageError>;
}
