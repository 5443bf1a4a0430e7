//! Utilities shared by the chat server binaries and tests.

pub mod logger;
pub mod time;
