//! HTTP API DTOs.
//!
//! Request fields are optional so that a missing or mistyped field reaches the
//! validation step instead of failing inside the extractor. Response field
//! names follow the wire format existing clients of the chat room expect
//! (`_id`, `lastStatus`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::MessageKind;

/// `POST /participants` body. Keys other than `name` are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterParticipantRequest {
    pub name: Option<String>,
}

/// `POST /messages` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostMessageRequest {
    pub to: Option<String>,
    pub text: Option<String>,
    pub r#type: Option<String>,
}

/// `GET /messages` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<String>,
}

/// Participant as returned by `GET /participants`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    /// Unix timestamp (milliseconds)
    pub last_status: i64,
}

/// Message as returned by `GET /messages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub text: String,
    pub r#type: MessageKind,
    pub time: String,
}
