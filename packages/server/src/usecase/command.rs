//! Validated inbound actions.
//!
//! A `SessionCommand` only exists once every payload field has passed
//! value-object validation; the UI layer builds it from the wire DTO and
//! routes it to the matching use case.

use crate::domain::{
    Award, MessageContent, PlaybackTime, PollId, PollOption, Username, VideoId, VideoUrl,
};

/// Inbound client action with validated payload
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Join {
        username: Username,
    },
    SendMessage {
        content: MessageContent,
        username: Username,
    },
    LoadVideo {
        url: VideoUrl,
        video_id: VideoId,
    },
    SetPlayPause {
        is_playing: bool,
        current_time: PlaybackTime,
    },
    ReportProgress {
        current_time: PlaybackTime,
    },
    Seek {
        current_time: PlaybackTime,
    },
    SyncRequest {
        current_time: Option<PlaybackTime>,
        is_playing: Option<bool>,
    },
    GiveAward {
        award: Award,
    },
    SurpriseMe {
        message: MessageContent,
    },
    Typing {
        is_typing: bool,
    },
    StartPoll {
        options: Vec<PollOption>,
    },
    PollVote {
        poll_id: PollId,
        option: PollOption,
        user: Username,
    },
    PollEnd,
}

impl SessionCommand {
    /// Event name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::SendMessage { .. } => "send-message",
            Self::LoadVideo { .. } => "load-video",
            Self::SetPlayPause { .. } => "set-playpause",
            Self::ReportProgress { .. } => "report-progress",
            Self::Seek { .. } => "seek",
            Self::SyncRequest { .. } => "sync-request",
            Self::GiveAward { .. } => "give-award",
            Self::SurpriseMe { .. } => "surprise-me",
            Self::Typing { is_typing: true } => "typing-start",
            Self::Typing { is_typing: false } => "typing-stop",
            Self::StartPoll { .. } => "start-poll",
            Self::PollVote { .. } => "poll-vote",
            Self::PollEnd => "poll-end",
        }
    }
}
