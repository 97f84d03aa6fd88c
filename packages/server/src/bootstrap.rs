//! Dependency wiring.
//!
//! The single place where the session, the router and the use cases are
//! created and connected to each other.

use std::{collections::HashMap, sync::Arc};

use sajiki_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    domain::{BroadcastRouter, Session},
    infrastructure::broadcast::WebSocketBroadcastRouter,
    ui::AppState,
    usecase::{
        ConnectParticipantUseCase, ControlPlaybackUseCase, DisconnectParticipantUseCase,
        GetSessionStateUseCase, ReactUseCase, RunPollUseCase, SendMessageUseCase,
        SharedSession,
    },
};

/// Build the application state around a fresh session.
pub fn build_app_state(clock: Arc<dyn Clock>) -> AppState {
    // 1. Session (single process-owned context)
    let session: SharedSession = Arc::new(Mutex::new(Session::new(clock)));

    // 2. BroadcastRouter (WebSocket implementation)
    let router: Arc<dyn BroadcastRouter> =
        Arc::new(WebSocketBroadcastRouter::new(Arc::new(Mutex::new(HashMap::new()))));

    // 3. UseCases
    AppState {
        connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
            session.clone(),
            router.clone(),
        )),
        disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
            session.clone(),
            router.clone(),
        )),
        send_message_usecase: Arc::new(SendMessageUseCase::new(session.clone(), router.clone())),
        control_playback_usecase: Arc::new(ControlPlaybackUseCase::new(
            session.clone(),
            router.clone(),
        )),
        react_usecase: Arc::new(ReactUseCase::new(session.clone(), router.clone())),
        run_poll_usecase: Arc::new(RunPollUseCase::new(session.clone(), router)),
        get_session_state_usecase: Arc::new(GetSessionStateUseCase::new(session)),
    }
}
