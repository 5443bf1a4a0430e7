//! UseCase: 参加者登録処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterParticipantUseCase::execute() メソッド
//! - 名前の重複チェックと入室メッセージの追加
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の登録と入室メッセージ
//! - 異常系：重複した名前（事前チェック、およびストアの一意制約）
//! - 異常系：入室メッセージの追加失敗（参加者は残る）

use std::sync::Arc;

use batepapo_shared::time::{Clock, format_local_clock_time};

use crate::domain::{
    Message, MessageRepository, Participant, ParticipantName, ParticipantRepository, Timestamp,
};

use super::error::RegisterParticipantError;

/// 参加者登録のユースケース
pub struct RegisterParticipantUseCase {
    participants: Arc<dyn ParticipantRepository>,
    messages: Arc<dyn MessageRepository>,
    clock: Arc<dyn Clock>,
}

impl RegisterParticipantUseCase {
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

    /// 参加者登録を実行
    ///
    /// Inserts the participant with `last_status = now`, then appends the
    /// "entered the room" status message. The two writes are independent: if
    /// the second one fails the participant stays registered and the error is
    /// returned.
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 登録された参加者
    /// * `Err(RegisterParticipantError)` - 登録失敗
    pub async fn execute(
        &self,
        name: ParticipantName,
    ) -> Result<Participant, RegisterParticipantError> {
        // 1. 重複チェック
        if self.participants.find_by_name(&name).await?.is_some() {
            return Err(RegisterParticipantError::DuplicateName(name.into_string()));
        }

        // 2. 参加者を追加（同時登録はストアの一意制約で DuplicateName になる）
        let now = self.clock.now_millis();
        let participant = Participant::new(name, Timestamp::new(now));
        self.participants.insert(participant.clone()).await?;
        tracing::info!("Participant '{}' registered", participant.name);

        // 3. 入室メッセージを追加
        let joined = Message::status_joined(
            participant.name.clone(),
            Timestamp::new(now),
            format_local_clock_time(now),
        );
        if let Err(e) = self.messages.append(joined).await {
            tracing::error!(
                "Participant '{}' registered but the join notice was not logged: {}",
                participant.name,
                e
            );
            return Err(e.into());
        }

        Ok(participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            MessageKind, RepositoryError,
            repository::{MockMessageRepository, MockParticipantRepository},
        },
        infrastructure::repository::{InMemoryMessageRepository, InMemoryParticipantRepository},
    };
    use batepapo_shared::time::ManualClock;

    fn name(value: &str) -> ParticipantName {
        ParticipantName::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_register_participant_success() {
        // テスト項目: 新規参加者が登録され、入室メッセージが 1 件追加される
        // given (前提条件):
        let participants = Arc::new(InMemoryParticipantRepository::new());
        let messages = Arc::new(InMemoryMessageRepository::new());
        let usecase = RegisterParticipantUseCase::new(
            participants.clone(),
            messages.clone(),
            Arc::new(ManualClock::new(5_000)),
        );

        // when (操作):
        let result = usecase.execute(name("Alice")).await;

        // then (期待する結果):
        let participant = result.unwrap();
        assert_eq!(participant.name, name("Alice"));
        assert_eq!(participant.last_status, Timestamp::new(5_000));

        let stored = participants.list().await.unwrap();
        assert_eq!(stored, vec![participant]);

        let log = messages.find_visible_to(None, None).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].from, name("Alice"));
        assert!(log[0].to.is_everyone());
        assert_eq!(log[0].kind, MessageKind::Status);
        assert_eq!(log[0].text.as_str(), "entered the room");
    }

    #[tokio::test]
    async fn test_register_participant_twice_conflicts() {
        // テスト項目: 同じ名前での 2 回目の登録は DuplicateName になり、レコードは 1 件のまま
        // given (前提条件):
        let participants = Arc::new(InMemoryParticipantRepository::new());
        let messages = Arc::new(InMemoryMessageRepository::new());
        let usecase = RegisterParticipantUseCase::new(
            participants.clone(),
            messages.clone(),
            Arc::new(ManualClock::new(5_000)),
        );
        usecase.execute(name("Alice")).await.unwrap();

        // when (操作):
        let result = usecase.execute(name("Alice")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RegisterParticipantError::DuplicateName("Alice".to_string()))
        );
        assert_eq!(participants.list().await.unwrap().len(), 1);
        assert_eq!(messages.find_visible_to(None, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_participant_lost_race_conflicts() {
        // テスト項目: 事前チェック後に他の登録が先行した場合もストアの一意制約で DuplicateName になる
        // given (前提条件):
        let mut participants = MockParticipantRepository::new();
        participants
            .expect_find_by_name()
            .times(1)
            .returning(|_| Ok(None));
        participants
            .expect_insert()
            .times(1)
            .returning(|p| Err(RepositoryError::DuplicateName(p.name.into_string())));
        let mut messages = MockMessageRepository::new();
        messages.expect_append().times(0);
        let usecase = RegisterParticipantUseCase::new(
            Arc::new(participants),
            Arc::new(messages),
            Arc::new(ManualClock::new(0)),
        );

        // when (操作):
        let result = usecase.execute(name("Alice")).await;

        // then (期待する結果): 入室メッセージは追加されない
        assert_eq!(
            result,
            Err(RegisterParticipantError::DuplicateName("Alice".to_string()))
        );
    }

    #[tokio::test]
    async fn test_register_participant_join_notice_failure_keeps_participant() {
        // テスト項目: 入室メッセージの追加に失敗しても参加者は登録されたまま（ロールバックなし）
        // given (前提条件):
        let participants = Arc::new(InMemoryParticipantRepository::new());
        let mut messages = MockMessageRepository::new();
        messages
            .expect_append()
            .times(1)
            .returning(|_| Err(RepositoryError::Unavailable("down".to_string())));
        let usecase = RegisterParticipantUseCase::new(
            participants.clone(),
            Arc::new(messages),
            Arc::new(ManualClock::new(0)),
        );

        // when (操作):
        let result = usecase.execute(name("Alice")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RegisterParticipantError::Repository(
                RepositoryError::Unavailable("down".to_string())
            ))
        );
        assert_eq!(participants.list().await.unwrap().len(), 1);
    }
}
