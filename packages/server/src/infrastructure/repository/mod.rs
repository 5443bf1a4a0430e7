//! Repository implementations.

pub mod inmemory;
pub mod sqlite;

pub use inmemory::{InMemoryMessageRepository, InMemoryParticipantRepository};
pub use sqlite::{SqliteDatabase, SqliteMessageRepository, SqliteParticipantRepository};
