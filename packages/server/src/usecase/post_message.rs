//! UseCase: メッセージ送信処理
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録済み参加者からのメッセージ追加
//! - 異常系：未登録の送信者（ログには何も追加されない）

use std::sync::Arc;

use batepapo_shared::time::{Clock, format_local_clock_time};

use crate::domain::{
    Message, MessageKind, MessageRepository, MessageText, ParticipantName, ParticipantRepository,
    Recipient, Timestamp,
};

use super::error::PostMessageError;

/// Validated message submitted by a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub from: ParticipantName,
    pub to: Recipient,
    pub text: MessageText,
    pub kind: MessageKind,
}

/// メッセージ送信のユースケース
pub struct PostMessageUseCase {
    participants: Arc<dyn ParticipantRepository>,
    messages: Arc<dyn MessageRepository>,
    clock: Arc<dyn Clock>,
}

impl PostMessageUseCase {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        messages: Arc<dyn MessageRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            participants,
            messages,
            clock,
        }
    }

    /// Append the message to the log if the sender is registered.
    pub async fn execute(&self, new_message: NewMessage) -> Result<Message, PostMessageError> {
        // 1. 送信者の存在チェック
        if self
            .participants
            .find_by_name(&new_message.from)
            .await?
            .is_none()
        {
            return Err(PostMessageError::UnknownSender(new_message.from.into_string()));
        }

        // 2. ログに追加
        let now = self.clock.now_millis();
        let message = Message::new(
            new_message.from,
            new_message.to,
            new_message.text,
            new_message.kind,
            Timestamp::new(now),
            format_local_clock_time(now),
        );
        self.messages.append(message.clone()).await?;
        tracing::debug!(
            "Message ({}) from '{}' to '{}' logged",
            message.kind.as_str(),
            message.from,
            message.to
        );

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::Participant,
        infrastructure::repository::{InMemoryMessageRepository, InMemoryParticipantRepository},
    };
    use batepapo_shared::time::ManualClock;

    fn name(value: &str) -> ParticipantName {
        ParticipantName::new(value.to_string()).unwrap()
    }

    fn broadcast_from(from: &str) -> NewMessage {
        NewMessage {
            from: name(from),
            to: Recipient::Everyone,
            text: MessageText::new("hi".to_string()).unwrap(),
            kind: MessageKind::Message,
        }
    }

    async fn setup() -> (PostMessageUseCase, Arc<InMemoryMessageRepository>) {
        let participants = Arc::new(InMemoryParticipantRepository::new());
        participants
            .insert(Participant::new(name("Alice"), Timestamp::new(0)))
            .await
            .unwrap();
        let messages = Arc::new(InMemoryMessageRepository::new());
        let usecase = PostMessageUseCase::new(
            participants,
            messages.clone(),
            Arc::new(ManualClock::new(0)),
        );
        (usecase, messages)
    }

    #[tokio::test]
    async fn test_post_broadcast_is_visible_to_any_viewer() {
        // テスト項目: Everyone 宛てのメッセージは任意の閲覧者から見える
        // given (前提条件):
        let (usecase, messages) = setup().await;

        // when (操作):
        let result = usecase.execute(broadcast_from("Alice")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        for viewer in ["Alice", "Bob", "nobody"] {
            let visible = messages
                .find_visible_to(Some(name(viewer)), None)
                .await
                .unwrap();
            assert_eq!(visible.len(), 1);
            assert_eq!(visible[0].text.as_str(), "hi");
        }
    }

    #[tokio::test]
    async fn test_post_message_from_unknown_sender() {
        // テスト項目: 未登録の送信者からのメッセージは拒否され、ログに追加されない
        // given (前提条件):
        let (usecase, messages) = setup().await;

        // when (操作):
        let result = usecase.execute(broadcast_from("Mallory")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(PostMessageError::UnknownSender("Mallory".to_string()))
        );
        assert!(messages.find_visible_to(None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_private_message_keeps_kind_and_recipient() {
        // テスト項目: 個別メッセージは種別と宛先を保持する
        // given (前提条件):
        let (usecase, messages) = setup().await;
        let private = NewMessage {
            from: name("Alice"),
            to: Recipient::parse("Bob".to_string()).unwrap(),
            text: MessageText::new("secret".to_string()).unwrap(),
            kind: MessageKind::PrivateMessage,
        };

        // when (操作):
        usecase.execute(private).await.unwrap();

        // then (期待する結果):
        let for_bob = messages.find_visible_to(Some(name("Bob")), None).await.unwrap();
        assert_eq!(for_bob.len(), 1);
        assert_eq!(for_bob[0].kind, MessageKind::PrivateMessage);
        assert_eq!(for_bob[0].to.as_str(), "Bob");
        let for_carol = messages
            .find_visible_to(Some(name("Carol")), None)
            .await
            .unwrap();
        assert!(for_carol.is_empty());
    }
}
