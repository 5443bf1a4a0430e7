//! Background liveness sweep.

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::usecase::SweepInactiveParticipantsUseCase;

/// Spawn the sweep loop on the runtime
pub fn spawn_sweeper(
    usecase: Arc<SweepInactiveParticipantsUseCase>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(run_sweeper(usecase, period))
}

/// Run a sweep every `period`, starting one period from now.
///
/// A failed sweep is logged and the loop waits for the next tick. `period`
/// must be non-zero.
pub async fn run_sweeper(usecase: Arc<SweepInactiveParticipantsUseCase>, period: Duration) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tracing::info!("Inactivity sweep running every {:?}", period);

    loop {
        interval.tick().await;

        match usecase.execute().await {
            Ok(report) => {
                if !report.removed.is_empty() || report.failed > 0 {
                    tracing::info!(
                        "Sweep: removed {} inactive participant(s), {} skipped, {} failure(s)",
                        report.removed.len(),
                        report.skipped,
                        report.failed
                    );
                }
            }
            Err(e) => {
                tracing::error!("Sweep failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            MessageRepository, Participant, ParticipantName, ParticipantRepository,
            RepositoryError, Timestamp, repository::MockParticipantRepository,
        },
        infrastructure::repository::{InMemoryMessageRepository, InMemoryParticipantRepository},
    };
    use batepapo_shared::time::ManualClock;

    #[tokio::test]
    async fn test_sweeper_removes_stale_participant_on_tick() {
        // テスト項目: 周期ごとに非アクティブな参加者が削除される
        // given (前提条件):
        let participants = Arc::new(InMemoryParticipantRepository::new());
        let messages = Arc::new(InMemoryMessageRepository::new());
        participants
            .insert(Participant::new(
                ParticipantName::new("alice".to_string()).unwrap(),
                Timestamp::new(0),
            ))
            .await
            .unwrap();
        let usecase = Arc::new(SweepInactiveParticipantsUseCase::new(
            participants.clone(),
            messages.clone(),
            Arc::new(ManualClock::new(60_000)),
            Duration::from_millis(10_000),
        ));

        // when (操作):
        let handle = spawn_sweeper(usecase, Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();

        // then (期待する結果):
        assert!(participants.list().await.unwrap().is_empty());
        assert_eq!(messages.find_visible_to(None, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sweeper_keeps_running_after_failure() {
        // テスト項目: スイープが失敗してもループは止まらず次の周期で再実行される
        // given (前提条件):
        let mut participants = MockParticipantRepository::new();
        participants
            .expect_find_inactive()
            .times(2..)
            .returning(|_| Err(RepositoryError::Unavailable("down".to_string())));
        let usecase = Arc::new(SweepInactiveParticipantsUseCase::new(
            Arc::new(participants),
            Arc::new(InMemoryMessageRepository::new()),
            Arc::new(ManualClock::new(60_000)),
            Duration::from_millis(10_000),
        ));

        // when (操作):
        let handle = spawn_sweeper(usecase, Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(200)).await;

        // then (期待する結果): タスクはまだ動いている
        assert!(!handle.is_finished());
        handle.abort();
        let _ = handle.await;
    }
}
