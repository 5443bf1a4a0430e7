//! SQLite message log.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{Row, params};
use uuid::Uuid;

use super::database::{SqliteDatabase, corrupted, unavailable};
use crate::domain::{
    Message, MessageId, MessageKind, MessageLimit, MessageRepository, MessageText,
    ParticipantName, Recipient, RepositoryError, Timestamp, value_object::EVERYONE,
};

/// SQLite message repository (append-only)
#[derive(Clone)]
pub struct SqliteMessageRepository {
    db: Arc<SqliteDatabase>,
}

impl SqliteMessageRepository {
    pub fn new(db: Arc<SqliteDatabase>) -> Self {
        Self { db }
    }
}

/// Raw `messages` row
struct MessageRow {
    id: String,
    sender: String,
    recipient: String,
    text: String,
    kind: String,
    time: String,
    created_at: i64,
}

impl MessageRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            sender: row.get(1)?,
            recipient: row.get(2)?,
            text: row.get(3)?,
            kind: row.get(4)?,
            time: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let id = Uuid::parse_str(&self.id).map_err(|e| corrupted("message id", e))?;
        Ok(Message {
            id: MessageId::from_uuid(id),
            from: ParticipantName::new(self.sender).map_err(|e| corrupted("sender", e))?,
            to: Recipient::parse(self.recipient).map_err(|e| corrupted("recipient", e))?,
            text: MessageText::new(self.text).map_err(|e| corrupted("message text", e))?,
            kind: MessageKind::from_stored(&self.kind).map_err(|e| corrupted("message kind", e))?,
            time: self.time,
            created_at: Timestamp::new(self.created_at),
        })
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn append(&self, message: Message) -> Result<(), RepositoryError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (id, sender, recipient, text, kind, time, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    message.id.as_uuid().to_string(),
                    message.from.as_str(),
                    message.to.as_str(),
                    message.text.as_str(),
                    message.kind.as_str(),
                    message.time,
                    message.created_at.value(),
                ],
            )
            .map_err(unavailable)?;
            Ok(())
        })
    }

    async fn find_visible_to(
        &self,
        viewer: Option<ParticipantName>,
        limit: Option<MessageLimit>,
    ) -> Result<Vec<Message>, RepositoryError> {
        // Negative LIMIT means no limit in SQLite.
        let limit = limit.map_or(-1, |l| i64::try_from(l.get()).unwrap_or(i64::MAX));
        let viewer = viewer.as_ref().map(ParticipantName::as_str);

        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, sender, recipient, text, kind, time, created_at
                     FROM messages
                     WHERE recipient = ?1 OR sender = ?2 OR recipient = ?2
                     ORDER BY seq DESC
                     LIMIT ?3",
                )
                .map_err(unavailable)?;
            let mut rows = stmt
                .query_map(params![EVERYONE, viewer, limit], MessageRow::read)
                .map_err(unavailable)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(unavailable)?;
            // Latest first from the query; the log is returned oldest first.
            rows.reverse();
            rows.into_iter().map(MessageRow::into_message).collect()
        })
    }
}
