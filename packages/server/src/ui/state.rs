//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, ControlPlaybackUseCase, DisconnectParticipantUseCase,
    GetSessionStateUseCase, ReactUseCase, RunPollUseCase, SendMessageUseCase,
};

/// Use cases reachable from the handlers
pub struct AppState {
    /// ConnectParticipantUseCase（接続と参加）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（切断）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// SendMessageUseCase（チャット）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// ControlPlaybackUseCase（再生同期）
    pub control_playback_usecase: Arc<ControlPlaybackUseCase>,
    /// ReactUseCase（アワード・サプライズ・入力中表示）
    pub react_usecase: Arc<ReactUseCase>,
    /// RunPollUseCase（投票）
    pub run_poll_usecase: Arc<RunPollUseCase>,
    /// GetSessionStateUseCase（状態取得）
    pub get_session_state_usecase: Arc<GetSessionStateUseCase>,
}
