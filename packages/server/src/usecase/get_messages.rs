//! UseCase: メッセージ取得

use std::sync::Arc;

use crate::domain::{Message, MessageLimit, MessageRepository, ParticipantName, RepositoryError};

/// メッセージ取得のユースケース
pub struct GetMessagesUseCase {
    messages: Arc<dyn MessageRepository>,
}

impl GetMessagesUseCase {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    /// Messages visible to `viewer`, oldest first.
    ///
    /// This is a visibility filter, not an access check: the viewer is
    /// whoever the caller claims to be.
    pub async fn execute(
        &self,
        viewer: Option<ParticipantName>,
        limit: Option<MessageLimit>,
    ) -> Result<Vec<Message>, RepositoryError> {
        self.messages.find_visible_to(viewer, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessageKind, MessageText, Recipient, Timestamp},
        infrastructure::repository::InMemoryMessageRepository,
    };

    fn name(value: &str) -> ParticipantName {
        ParticipantName::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_get_messages_limit_never_exceeds_and_filters() {
        // テスト項目: limit=2 の場合、Bob に見える最新 2 件のみが返る
        // given (前提条件):
        let messages = Arc::new(InMemoryMessageRepository::new());
        for (i, to) in ["Everyone", "Bob", "Carol", "Everyone", "Carol"]
            .into_iter()
            .enumerate()
        {
            messages
                .append(Message::new(
                    name("Alice"),
                    Recipient::parse(to.to_string()).unwrap(),
                    MessageText::new(i.to_string()).unwrap(),
                    MessageKind::Message,
                    Timestamp::new(i as i64),
                    "0:0:0".to_string(),
                ))
                .await
                .unwrap();
        }
        let usecase = GetMessagesUseCase::new(messages);

        // when (操作):
        let result = usecase
            .execute(Some(name("Bob")), MessageLimit::new(2))
            .await
            .unwrap();

        // then (期待する結果):
        let texts: Vec<&str> = result.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["1", "3"]);
    }
}
