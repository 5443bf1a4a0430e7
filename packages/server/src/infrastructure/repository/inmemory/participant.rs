//! InMemory participant registry.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Participant, ParticipantId, ParticipantName, ParticipantRepository, RepositoryError, Timestamp,
};

/// インメモリ participant repository
#[derive(Clone, Default)]
pub struct InMemoryParticipantRepository {
    participants: Arc<Mutex<Vec<Participant>>>,
}

impl InMemoryParticipantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn insert(&self, participant: Participant) -> Result<(), RepositoryError> {
        let mut participants = self.participants.lock().await;
        if participants.iter().any(|p| p.name == participant.name) {
            return Err(RepositoryError::DuplicateName(participant.name.into_string()));
        }
        participants.push(participant);
        Ok(())
    }

    async fn find_by_name(
        &self,
        name: &ParticipantName,
    ) -> Result<Option<Participant>, RepositoryError> {
        let participants = self.participants.lock().await;
        Ok(participants.iter().find(|p| &p.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Participant>, RepositoryError> {
        let participants = self.participants.lock().await;
        Ok(participants.clone())
    }

    async fn touch(
        &self,
        name: &ParticipantName,
        now: Timestamp,
    ) -> Result<Option<Participant>, RepositoryError> {
        let mut participants = self.participants.lock().await;
        let Some(participant) = participants.iter_mut().find(|p| &p.name == name) else {
            return Ok(None);
        };
        // Two keep-alives within the same millisecond still move the value.
        let floor = Timestamp::new(participant.last_status.value().saturating_add(1));
        participant.last_status = now.max(floor);
        Ok(Some(participant.clone()))
    }

    async fn find_inactive(&self, cutoff: Timestamp) -> Result<Vec<Participant>, RepositoryError> {
        let participants = self.participants.lock().await;
        Ok(participants
            .iter()
            .filter(|p| p.is_inactive_since(cutoff))
            .cloned()
            .collect())
    }

    async fn remove_if_inactive(
        &self,
        id: &ParticipantId,
        cutoff: Timestamp,
    ) -> Result<Option<Participant>, RepositoryError> {
        let mut participants = self.participants.lock().await;
        let position = participants
            .iter()
            .position(|p| &p.id == id && p.is_inactive_since(cutoff));
        Ok(position.map(|index| participants.remove(index)))
    }
}
