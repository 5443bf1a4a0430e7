//! Domain layer: value objects, entities and the repository interfaces the
//! use cases depend on.

pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use entity::{Message, Participant};
pub use error::{RepositoryError, ValidationError};
pub use repository::{MessageRepository, ParticipantRepository};
pub use value_object::{
    MessageId, MessageKind, MessageLimit, MessageText, ParticipantId, ParticipantName, Recipient,
    Timestamp,
};
