//! UseCase: 参加者のステータス更新（keep-alive）

use std::sync::Arc;

use batepapo_shared::time::Clock;

use crate::domain::{Participant, ParticipantName, ParticipantRepository, Timestamp};

use super::error::KeepAliveError;

/// keep-alive のユースケース
pub struct KeepAliveUseCase {
    participants: Arc<dyn ParticipantRepository>,
    clock: Arc<dyn Clock>,
}

impl KeepAliveUseCase {
    pub fn new(participants: Arc<dyn ParticipantRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            participants,
            clock,
        }
    }

    /// Refresh the participant's `last_status`.
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 更新後の参加者
    /// * `Err(KeepAliveError::ParticipantNotFound)` - 未登録の名前（何も変更しない）
    pub async fn execute(&self, name: ParticipantName) -> Result<Participant, KeepAliveError> {
        let now = Timestamp::new(self.clock.now_millis());
        match self.participants.touch(&name, now).await? {
            Some(participant) => {
                tracing::debug!(
                    "Participant '{}' is alive at {}",
                    participant.name,
                    participant.last_status.value()
                );
                Ok(participant)
            }
            None => Err(KeepAliveError::ParticipantNotFound(name.into_string())),
        }
    }
}
