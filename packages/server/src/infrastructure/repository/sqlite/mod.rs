//! SQLite Repository 実装
//!
//! Both collections live in one database file behind a single connection.
//! Every repository call takes the connection lock for one statement (or one
//! transaction), so single-record operations are atomic with respect to each
//! other and to the sweeper.

mod database;
mod message;
mod migrations;
mod participant;

pub use database::SqliteDatabase;
pub use message::SqliteMessageRepository;
pub use participant::SqliteParticipantRepository;
