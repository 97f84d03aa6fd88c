//! WebSocket message DTOs for the watch-together session.
//!
//! Every frame is a JSON object whose `type` field names the event; payload
//! fields are camelCase.

use serde::{Deserialize, Serialize};

/// Inbound event (client → server)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    #[serde(alias = "user-join")]
    Join { username: String },
    SendMessage { content: String, username: String },
    LoadVideo { url: String, video_id: String },
    #[serde(alias = "video-playpause")]
    SetPlaypause { is_playing: bool, current_time: f64 },
    ReportProgress { current_time: f64 },
    #[serde(alias = "video-seek")]
    Seek { current_time: f64 },
    SyncRequest {
        #[serde(default)]
        current_time: Option<f64>,
        #[serde(default)]
        is_playing: Option<bool>,
    },
    GiveAward { award: String },
    SurpriseMe { message: String },
    TypingStart,
    TypingStop,
    StartPoll { options: Vec<String> },
    PollVote {
        poll_id: u64,
        option: String,
        user: String,
    },
    PollEnd,
}

/// Outbound event (server → client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    SystemMessage { message: String, timestamp: i64 },
    UserCount { n: usize },
    NewMessage(ChatMessageDto),
    TriggerEffect { trigger: String, user: String },
    VideoLoaded {
        url: String,
        video_id: String,
        user: String,
    },
    VideoSync(PlaybackSnapshotDto),
    VideoPlaypauseSync {
        is_playing: bool,
        current_time: f64,
        user: String,
    },
    VideoProgressSync { current_time: f64 },
    VideoSeek { current_time: f64, user: String },
    SyncRequested { user: String },
    AwardGiven { award: String, user: String },
    SurprisePopup { message: String, user: String },
    UserTyping { username: String, is_typing: bool },
    PollStarted(PollDto),
    PollVote { user: String, option: String },
    PollEnded { results: Vec<PollResultDto> },
}

/// Chat message as seen by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    /// Message id (the sender's connection id)
    pub id: String,
    pub content: String,
    pub username: String,
    /// Unix timestamp (milliseconds)
    pub timestamp: i64,
    pub sender_id: String,
}

/// Full playback state
///
/// `url` and `videoId` are empty strings while no video is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshotDto {
    pub url: String,
    pub video_id: String,
    pub is_playing: bool,
    /// Seconds
    pub current_time: f64,
    /// Unix timestamp (milliseconds)
    pub last_update: i64,
}

/// Poll descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollDto {
    pub id: u64,
    pub options: Vec<String>,
    /// Unix timestamp (milliseconds)
    pub start_time: i64,
}

/// One entry of a poll tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollResultDto {
    pub user: String,
    pub option: String,
}
