//! Value objects.
//!
//! Every constructor validates its input, so a value that exists is a valid one.

use std::{fmt, num::NonZeroUsize};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValidationError;

/// Wire literal of the broadcast recipient
pub const EVERYONE: &str = "Everyone";

/// Display name identifying a participant (exact, case-sensitive match)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantName(String);

impl ParticipantName {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store identity of a participant record.
///
/// A name can be registered again after its holder was swept, so the sweeper
/// deletes by this id rather than by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identity of a record loaded back from a store
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Store identity of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Addressee of a message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    /// Visible to every participant
    Everyone,
    /// A single name. It does not have to belong to a registered participant.
    Named(String),
}

impl Recipient {
    pub fn parse(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyRecipient);
        }
        if value == EVERYONE {
            return Ok(Self::Everyone);
        }
        Ok(Self::Named(value))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Everyone => EVERYONE,
            Self::Named(name) => name,
        }
    }

    pub fn is_everyone(&self) -> bool {
        matches!(self, Self::Everyone)
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(Self(value))
    }

    /// Server-generated text, known to be non-empty
    pub(crate) fn from_static(text: &'static str) -> Self {
        debug_assert!(!text.is_empty());
        Self(text.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Kind of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Public message
    Message,
    /// Message addressed to one participant
    PrivateMessage,
    /// System-generated join/leave notice
    Status,
}

impl MessageKind {
    /// Parse a kind submitted by a client. `status` is reserved for the server.
    pub fn from_client(value: &str) -> Result<Self, ValidationError> {
        match value {
            "message" => Ok(Self::Message),
            "private_message" => Ok(Self::PrivateMessage),
            other => Err(ValidationError::UnsupportedMessageKind(other.to_string())),
        }
    }

    /// Parse any kind, including `status`, as written by [`Self::as_str`]
    pub fn from_stored(value: &str) -> Result<Self, ValidationError> {
        match value {
            "status" => Ok(Self::Status),
            other => Self::from_client(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::PrivateMessage => "private_message",
            Self::Status => "status",
        }
    }
}

/// Maximum number of messages returned by a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageLimit(NonZeroUsize);

impl MessageLimit {
    pub fn new(value: usize) -> Option<Self> {
        NonZeroUsize::new(value).map(Self)
    }

    /// Parse the `limit` query parameter
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        value
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ValidationError::InvalidLimit(value.to_string()))
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

/// Unix timestamp (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// The timestamp `millis` earlier
    pub fn minus_millis(&self, millis: i64) -> Self {
        Self(self.0.saturating_sub(millis))
    }
}
