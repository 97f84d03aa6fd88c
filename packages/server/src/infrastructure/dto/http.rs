//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

/// Read-only view of the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStateDto {
    pub participants: Vec<ParticipantDto>,
    pub participant_count: usize,
    pub playback: PlaybackDto,
    pub chat_history_size: usize,
    pub active_poll: Option<ActivePollDto>,
    /// RFC 3339 (JST)
    pub created_at: Option<String>,
}

/// Participant information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub connection_id: String,
    pub username: String,
}

/// Playback snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackDto {
    pub url: Option<String>,
    pub video_id: Option<String>,
    pub is_playing: bool,
    pub current_time: f64,
    /// RFC 3339 (JST)
    pub last_update: Option<String>,
}

/// Active poll with its current vote count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePollDto {
    pub id: u64,
    pub options: Vec<String>,
    /// RFC 3339 (JST)
    pub started_at: Option<String>,
    pub vote_count: usize,
}
