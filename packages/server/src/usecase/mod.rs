//! UseCase layer: one struct per operation of the chat room.

mod error;
mod get_messages;
mod keep_alive;
mod list_participants;
mod post_message;
mod register_participant;
mod sweep_inactive_participants;

pub use error::{KeepAliveError, PostMessageError, RegisterParticipantError, SweepError};
pub use get_messages::GetMessagesUseCase;
pub use keep_alive::KeepAliveUseCase;
pub use list_participants::ListParticipantsUseCase;
pub use post_message::{NewMessage, PostMessageUseCase};
pub use register_participant::RegisterParticipantUseCase;
pub use sweep_inactive_participants::{SweepInactiveParticipantsUseCase, SweepReport};
