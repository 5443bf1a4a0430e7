//! Conversion logic between DTOs and domain entities.

use crate::domain::{Message, Participant};
use crate::infrastructure::dto::http as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Participant> for dto::ParticipantDto {
    fn from(model: Participant) -> Self {
        Self {
            id: *model.id.as_uuid(),
            name: model.name.into_string(),
            last_status: model.last_status.value(),
        }
    }
}

impl From<Message> for dto::MessageDto {
    fn from(model: Message) -> Self {
        Self {
            id: *model.id.as_uuid(),
            from: model.from.into_string(),
            to: model.to.as_str().to_string(),
            text: model.text.into_string(),
            r#type: model.kind,
            time: model.time,
        }
    }
}
