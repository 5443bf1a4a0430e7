//! Entities stored in the participant registry and the message log.

use super::value_object::{
    MessageId, MessageKind, MessageText, ParticipantId, ParticipantName, Recipient, Timestamp,
};

/// Status text appended when a participant registers
pub const JOINED_TEXT: &str = "entered the room";
/// Status text appended when a participant is swept
pub const LEFT_TEXT: &str = "left the room";

/// Registered participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: ParticipantName,
    /// Last registration or keep-alive
    pub last_status: Timestamp,
}

impl Participant {
    pub fn new(name: ParticipantName, last_status: Timestamp) -> Self {
        Self {
            id: ParticipantId::generate(),
            name,
            last_status,
        }
    }

    /// Whether the last keep-alive is strictly older than `cutoff`
    pub fn is_inactive_since(&self, cutoff: Timestamp) -> bool {
        self.last_status < cutoff
    }
}

/// Entry of the message log. Entries are never modified after insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub from: ParticipantName,
    pub to: Recipient,
    pub text: MessageText,
    pub kind: MessageKind,
    /// `H:M:S` rendering of `created_at`
    pub time: String,
    pub created_at: Timestamp,
}

impl Message {
    pub fn new(
        from: ParticipantName,
        to: Recipient,
        text: MessageText,
        kind: MessageKind,
        created_at: Timestamp,
        time: String,
    ) -> Self {
        Self {
            id: MessageId::generate(),
            from,
            to,
            text,
            kind,
            time,
            created_at,
        }
    }

    /// Broadcast status notice for a participant entering the room
    pub fn status_joined(name: ParticipantName, created_at: Timestamp, time: String) -> Self {
        Self::status(name, JOINED_TEXT, created_at, time)
    }

    /// Broadcast status notice for a participant removed from the room
    pub fn status_left(name: ParticipantName, created_at: Timestamp, time: String) -> Self {
        Self::status(name, LEFT_TEXT, created_at, time)
    }

    fn status(
        name: ParticipantName,
        text: &'static str,
        created_at: Timestamp,
        time: String,
    ) -> Self {
        Self::new(
            name,
            Recipient::Everyone,
            MessageText::from_static(text),
            MessageKind::Status,
            created_at,
            time,
        )
    }

    /// Visibility rule of the log.
    ///
    /// Broadcasts are visible to everyone, including callers that did not
    /// identify themselves. Other entries are visible to their sender and
    /// their recipient.
    pub fn is_visible_to(&self, viewer: Option<&ParticipantName>) -> bool {
        if self.to.is_everyone() {
            return true;
        }
        match viewer {
            Some(viewer) => &self.from == viewer || self.to.as_str() == viewer.as_str(),
            None => false,
        }
    }
}
