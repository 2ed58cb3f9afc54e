//! SQLite-backed message store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::traits::MessageStore;
use crate::domain::entities::{Message, MessageStatus};
use crate::application::errors::StorageError;

const SELECT_COLUMNS: &str = "SELECT id, uuid, text, status, created_at FROM messages";

/// Row as stored, before the typed columns are checked
struct MessageRow {
    id: i64,
    uuid: String,
    text: String,
    status: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &rusqlite::Row<'_>) -> SqliteResult<Self> {
        Ok(Self {
            id: row.get(0)?,
            uuid: row.get(1)?,
            text: row.get(2)?,
            status: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn into_message(self) -> Result<Message, StorageError> {
        let uuid = Uuid::parse_str(&self.uuid)
            .map_err(|e| StorageError::Corrupt(format!("row {}: bad uuid: {}", self.id, e)))?;
        let status = self.status
            .parse::<MessageStatus>()
            .map_err(|e| StorageError::Corrupt(format!("row {}: {}", self.id, e)))?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| StorageError::Corrupt(format!("row {}: bad created_at: {}", self.id, e)))?
            .with_timezone(&Utc);

        Ok(Message {
            id: Some(self.id),
            uuid,
            text: self.text,
            status,
            created_at,
        })
    }
}

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        Self::init_tables(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn init_tables(conn: &Connection) -> SqliteResult<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                uuid TEXT UNIQUE NOT NULL,
                text TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_messages_status ON messages(status)",
            [],
        )?;

        Ok(())
    }

    /// Run a blocking closure against the connection on tokio's blocking pool
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StorageError::Unavailable("Lock poisoned".to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| StorageError::Unavailable(format!("Storage task failed: {}", e)))?
    }

    fn query_messages(conn: &Connection, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Message>, StorageError> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, MessageRow::from_row)?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?.into_message()?);
        }
        Ok(messages)
    }
}

#[async_trait]
impl MessageStore for SqliteStore {
    async fn save(&self, message: &Message) -> Result<i64, StorageError> {
        let uuid = message.uuid.to_string();
        let text = message.text.clone();
        let status = message.status.as_str();
        let created_at = message.created_at.to_rfc3339();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO messages (uuid, text, status, created_at) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![uuid, text, status, created_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    async fn find_all(&self) -> Result<Vec<Message>, StorageError> {
        self.with_conn(|conn| Self::query_messages(conn, SELECT_COLUMNS, &[]))
            .await
    }

    async fn find_by_status(&self, status: &str) -> Result<Vec<Message>, StorageError> {
        let status = status.to_string();
        self.with_conn(move |conn| {
            let sql = format!("{} WHERE status = ?1", SELECT_COLUMNS);
            Self::query_messages(conn, &sql, rusqlite::params![status])
        })
        .await
    }
}
