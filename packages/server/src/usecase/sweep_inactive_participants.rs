//! UseCase: 非アクティブな参加者の削除（liveness sweep）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SweepInactiveParticipantsUseCase::execute() メソッド
//! - スナップショット取得 → 参加者ごとの削除と退室メッセージ追加
//!
//! ### どのような状況を想定しているか
//! - 正常系：古い参加者だけが削除され、1 人につき退室メッセージが 1 件追加される
//! - エッジケース：スナップショット後に touch された参加者は削除されない
//! - 異常系：1 人の処理失敗が他の参加者の処理を妨げない
//! - 異常系：退室メッセージの追加失敗でも削除は取り消されない
//! - 異常系：スナップショットの取得失敗

use std::{sync::Arc, time::Duration};

use batepapo_shared::time::{Clock, format_local_clock_time};
use futures_util::future::join_all;

use crate::domain::{
    Message, MessageRepository, Participant, ParticipantName, ParticipantRepository, Timestamp,
};

use super::error::SweepError;

/// Result of one sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Participants deleted in this sweep
    pub removed: Vec<ParticipantName>,
    /// Snapshot entries that were already gone or had been refreshed
    pub skipped: usize,
    /// Per-participant failures (delete or departure notice)
    pub failed: usize,
}

enum Eviction {
    Removed {
        name: ParticipantName,
        departure_logged: bool,
    },
    Skipped,
    Failed,
}

/// 非アクティブ参加者削除のユースケース
pub struct SweepInactiveParticipantsUseCase {
    participants: Arc<dyn ParticipantRepository>,
    messages: Arc<dyn MessageRepository>,
    clock: Arc<dyn Clock>,
    inactivity_threshold: Duration,
}

impl SweepInactiveParticipantsUseCase {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        messages: Arc<dyn MessageRepository>,
        clock: Arc<dyn Clock>,
        inactivity_threshold: Duration,
    ) -> Self {
        Self {
            participants,
            messages,
            clock,
            inactivity_threshold,
        }
    }

    /// Run one sweep.
    ///
    /// Reads every participant whose `last_status` is older than
    /// `now - inactivity_threshold`, then handles each of them concurrently:
    /// delete (only if the record still exists and is still stale), then
    /// append one "left the room" notice. A failure on one participant does
    /// not affect the others, and a deleted participant is not restored when
    /// its notice fails.
    pub async fn execute(&self) -> Result<SweepReport, SweepError> {
        let threshold = i64::try_from(self.inactivity_threshold.as_millis()).unwrap_or(i64::MAX);
        let cutoff = Timestamp::new(self.clock.now_millis()).minus_millis(threshold);

        // 1. スナップショット
        let inactive = self
            .participants
            .find_inactive(cutoff)
            .await
            .map_err(SweepError::Snapshot)?;

        // 2. 参加者ごとに並行して処理
        let evictions = join_all(
            inactive
                .into_iter()
                .map(|participant| self.evict(participant, cutoff)),
        )
        .await;

        let mut report = SweepReport::default();
        for eviction in evictions {
            match eviction {
                Eviction::Removed {
                    name,
                    departure_logged,
                } => {
                    if !departure_logged {
                        report.failed += 1;
                    }
                    report.removed.push(name);
                }
                Eviction::Skipped => report.skipped += 1,
                Eviction::Failed => report.failed += 1,
            }
        }
        Ok(report)
    }

    async fn evict(&self, participant: Participant, cutoff: Timestamp) -> Eviction {
        let removed = match self
            .participants
            .remove_if_inactive(&participant.id, cutoff)
            .await
        {
            Ok(Some(removed)) => removed,
            Ok(None) => {
                tracing::debug!(
                    "Participant '{}' was refreshed or removed since the snapshot",
                    participant.name
                );
                return Eviction::Skipped;
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to remove inactive participant '{}': {}",
                    participant.name,
                    e
                );
                return Eviction::Failed;
            }
        };
        tracing::info!("Participant '{}' removed for inactivity", removed.name);

        let now = self.clock.now_millis();
        let left = Message::status_left(
            removed.name.clone(),
            Timestamp::new(now),
            format_local_clock_time(now),
        );
        let departure_logged = match self.messages.append(left).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Participant '{}' removed but the departure notice was not logged: {}",
                    removed.name,
                    e
                );
                false
            }
        };

        Eviction::Removed {
            name: removed.name,
            departure_logged,
        }
    }
}
