//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    GetMessagesUseCase, KeepAliveUseCase, ListParticipantsUseCase, PostMessageUseCase,
    RegisterParticipantUseCase,
};

/// Shared application state
pub struct AppState {
    /// RegisterParticipantUseCase（参加者登録）
    pub register_participant_usecase: Arc<RegisterParticipantUseCase>,
    /// ListParticipantsUseCase（参加者一覧）
    pub list_participants_usecase: Arc<ListParticipantsUseCase>,
    /// PostMessageUseCase（メッセージ送信）
    pub post_message_usecase: Arc<PostMessageUseCase>,
    /// GetMessagesUseCase（メッセージ取得）
    pub get_messages_usecase: Arc<GetMessagesUseCase>,
    /// KeepAliveUseCase（ステータス更新）
    pub keep_alive_usecase: Arc<KeepAliveUseCase>,
}
