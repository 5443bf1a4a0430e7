//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};

use crate::{
    domain::{MessageKind, MessageLimit, MessageText, ParticipantName, Recipient},
    infrastructure::dto::http::{
        MessageDto, MessagesQuery, ParticipantDto, PostMessageRequest,
        RegisterParticipantRequest,
    },
    ui::{error::ApiError, state::AppState},
    usecase::NewMessage,
};

/// Header carrying the caller's participant name
pub const USER_HEADER: &str = "user";

/// Caller name from the `user` header. Absent, empty or non-UTF-8 values
/// yield `None`.
/// Decoded as UTF-8; `HeaderValue::to_str` accepts visible ASCII only.
fn user_from_headers(headers: &HeaderMap) -> Option<ParticipantName> {
    headers
        .get(USER_HEADER)
        .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
        .and_then(|value| ParticipantName::new(value.to_string()).ok())
}

/// Required string field of a request body
fn required(field: Option<String>, name: &str) -> Result<String, ApiError> {
    field.ok_or_else(|| ApiError::InvalidInput(format!("missing field '{}'", name)))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /participants`
pub async fn register_participant(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterParticipantRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let name = ParticipantName::new(required(request.name, "name")?)?;

    state.register_participant_usecase.execute(name).await?;
    Ok(StatusCode::CREATED)
}

/// `GET /participants`
pub async fn list_participants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ParticipantDto>>, ApiError> {
    let participants = state.list_participants_usecase.execute().await?;
    Ok(Json(participants.into_iter().map(Into::into).collect()))
}

/// `POST /messages`
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<PostMessageRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let to = Recipient::parse(required(request.to, "to")?)?;
    let text = MessageText::new(required(request.text, "text")?)?;
    let kind = MessageKind::from_client(&required(request.r#type, "type")?)?;
    let from = user_from_headers(&headers)
        .ok_or_else(|| ApiError::InvalidInput("missing user header".to_string()))?;

    state
        .post_message_usecase
        .execute(NewMessage {
            from,
            to,
            text,
            kind,
        })
        .await?;
    Ok(StatusCode::CREATED)
}

/// `GET /messages?limit=N`
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    // `?limit=` with no value means no limit
    let limit = query
        .limit
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(MessageLimit::parse)
        .transpose()?;
    let viewer = user_from_headers(&headers);

    let messages = state.get_messages_usecase.execute(viewer, limit).await?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

/// `PUT /status`
pub async fn keep_alive(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let name = user_from_headers(&headers)
        .ok_or_else(|| ApiError::NotFound("missing user header".to_string()))?;

    state.keep_alive_usecase.execute(name).await?;
    Ok(StatusCode::OK)
}
