//! UseCase: 参加者一覧取得

use std::sync::Arc;

use crate::domain::{Participant, ParticipantRepository, RepositoryError};

/// 参加者一覧取得のユースケース
pub struct ListParticipantsUseCase {
    participants: Arc<dyn ParticipantRepository>,
}

impl ListParticipantsUseCase {
    pub fn new(participants: Arc<dyn ParticipantRepository>) -> Self {
        Self { participants }
    }

    /// All current participants, in registration order
    pub async fn execute(&self) -> Result<Vec<Participant>, RepositoryError> {
        self.participants.list().await
    }
}
