use async_trait::async_trait;
use crate::application::errors::DispatchError;
use crate::domain::entities::SendMessage;

/// Dispatcher trait - hands a send command to exactly one handler
///
/// Delivery may happen before `dispatch` returns or later on a worker; callers
/// must only rely on the command being processed eventually.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(&self, command: SendMessage) -> Result<(), DispatchError>;
}
