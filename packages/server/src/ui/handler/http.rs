//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{
        ActivePollDto, HealthDto, ParticipantDto, PlaybackDto, SessionStateDto,
    },
    ui::state::AppState,
};
use sajiki_shared::time::timestamp_to_jst_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Read-only view of the session
pub async fn get_session_state(State(state): State<Arc<AppState>>) -> Json<SessionStateDto> {
    let session = state.get_session_state_usecase.execute().await;

    // Domain Model から DTO への変換
    let participants: Vec<ParticipantDto> = session
        .participants
        .iter()
        .map(|p| ParticipantDto {
            connection_id: p.connection_id.as_str().to_string(),
            username: p.username.as_str().to_string(),
        })
        .collect();

    let playback = PlaybackDto {
        url: session
            .playback
            .video
            .as_ref()
            .map(|v| v.url.as_str().to_string()),
        video_id: session
            .playback
            .video
            .as_ref()
            .map(|v| v.video_id.as_str().to_string()),
        is_playing: session.playback.is_playing,
        current_time: session.playback.current_time.seconds(),
        last_update: timestamp_to_jst_rfc3339(session.playback.last_update.value()),
    };

    let active_poll = session.active_poll.map(|(poll, vote_count)| ActivePollDto {
        id: poll.id.value(),
        options: poll
            .options
            .iter()
            .map(|o| o.as_str().to_string())
            .collect(),
        started_at: timestamp_to_jst_rfc3339(poll.start_time.value()),
        vote_count,
    });

    Json(SessionStateDto {
        participant_count: participants.len(),
        participants,
        playback,
        chat_history_size: session.chat_history_size,
        active_poll,
        created_at: timestamp_to_jst_rfc3339(session.created_at.value()),
    })
}
