use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Lifecycle status of a message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Pending,
    Sent,
    Read,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Pending => "pending",
            MessageStatus::Sent => "sent",
            MessageStatus::Read => "read",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageStatus {
    type Err = String;

    /// Exact, case-sensitive match on the stored form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MessageStatus::Pending),
            "sent" => Ok(MessageStatus::Sent),
            "read" => Ok(MessageStatus::Read),
            other => Err(format!("unknown message status: {}", other)),
        }
    }
}

/// A persisted board message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Store-assigned row id, `None` until saved
    pub id: Option<i64>,
    pub uuid: Uuid,
    pub text: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            uuid: Uuid::new_v4(),
            text: text.into(),
            status: MessageStatus::default(),
            created_at: Utc::now(),
        }
    }

    pub fn with_status(mut self, status: MessageStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_message_is_pending_with_fresh_uuid() {
        let a = Message::new("hello");
        let b = Message::new("hello");

        assert_eq!(a.status, MessageStatus::Pending);
        assert_eq!(a.id, None);
        assert_ne!(a.uuid, b.uuid);
    }

    #[test]
    fn status_parses_only_exact_lowercase() {
        assert_eq!("sent".parse::<MessageStatus>(), Ok(MessageStatus::Sent));
        assert_eq!("read".parse::<MessageStatus>(), Ok(MessageStatus::Read));
        assert!("Sent".parse::<MessageStatus>().is_err());
        assert!("".parse::<MessageStatus>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&MessageStatus::Sent).unwrap();
        assert_eq!(json, "\"sent\"");
    }
}
