//! InMemory message log.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Message, MessageLimit, MessageRepository, ParticipantName, RepositoryError};

/// インメモリ message repository (append-only)
#[derive(Clone, Default)]
pub struct InMemoryMessageRepository {
    messages: Arc<Mutex<Vec<Message>>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, message: Message) -> Result<(), RepositoryError> {
        self.messages.lock().await.push(message);
        Ok(())
    }

    async fn find_visible_to(
        &self,
        viewer: Option<ParticipantName>,
        limit: Option<MessageLimit>,
    ) -> Result<Vec<Message>, RepositoryError> {
        let messages = self.messages.lock().await;
        let visible = messages
            .iter()
            .filter(|m| m.is_visible_to(viewer.as_ref()));

        let selected: Vec<Message> = match limit {
            Some(limit) => {
                let mut latest: Vec<Message> = visible.rev().take(limit.get()).cloned().collect();
                latest.reverse();
                latest
            }
            None => visible.cloned().collect(),
        };
        Ok(selected)
    }
}
