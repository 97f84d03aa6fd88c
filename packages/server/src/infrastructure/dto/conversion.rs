//! Conversion logic between DTOs and domain types.

use thiserror::Error;

use crate::domain::{
    Award, ChatMessage, MessageContent, PlaybackSnapshot, PlaybackTime, Poll, PollId,
    PollOption, SessionEvent, Username, ValueObjectError, VideoId, VideoUrl, Vote,
};
use crate::infrastructure::dto::websocket as dto;
use crate::usecase::SessionCommand;

/// Why an inbound frame was rejected at the boundary
#[derive(Debug, Error)]
pub enum ClientEventError {
    /// Not JSON, unknown `type`, or missing/mistyped fields
    #[error("malformed event: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Structurally valid but a field failed validation
    #[error("invalid event payload: {0}")]
    Invalid(#[from] ValueObjectError),
}

/// Parse and validate one inbound text frame.
pub fn parse_client_event(text: &str) -> Result<SessionCommand, ClientEventError> {
    let event: dto::ClientEvent = serde_json::from_str(text)?;
    Ok(SessionCommand::try_from(event)?)
}

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::ClientEvent> for SessionCommand {
    type Error = ValueObjectError;

    fn try_from(event: dto::ClientEvent) -> Result<Self, Self::Error> {
        use dto::ClientEvent as E;

        Ok(match event {
            E::Join { username } => Self::Join {
                username: Username::new(username)?,
            },
            E::SendMessage { content, username } => Self::SendMessage {
                content: MessageContent::new(content)?,
                username: Username::new(username)?,
            },
            E::LoadVideo { url, video_id } => Self::LoadVideo {
                url: VideoUrl::new(url)?,
                video_id: VideoId::new(video_id)?,
            },
            E::SetPlaypause {
                is_playing,
                current_time,
            } => Self::SetPlayPause {
                is_playing,
                current_time: PlaybackTime::new(current_time)?,
            },
            E::ReportProgress { current_time } => Self::ReportProgress {
                current_time: PlaybackTime::new(current_time)?,
            },
            E::Seek { current_time } => Self::Seek {
                current_time: PlaybackTime::new(current_time)?,
            },
            E::SyncRequest {
                current_time,
                is_playing,
            } => Self::SyncRequest {
                current_time: current_time.map(PlaybackTime::new).transpose()?,
                is_playing,
            },
            E::GiveAward { award } => Self::GiveAward {
                award: Award::new(award)?,
            },
            E::SurpriseMe { message } => Self::SurpriseMe {
                message: MessageContent::new(message)?,
            },
            E::TypingStart => Self::Typing { is_typing: true },
            E::TypingStop => Self::Typing { is_typing: false },
            E::StartPoll { options } => Self::StartPoll {
                options: PollOption::parse_all(options)?,
            },
            E::PollVote {
                poll_id,
                option,
                user,
            } => Self::PollVote {
                poll_id: PollId::new(poll_id),
                option: PollOption::new(option)?,
                user: Username::new(user)?,
            },
            E::PollEnd => Self::PollEnd,
        })
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&ChatMessage> for dto::ChatMessageDto {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.sender_id.as_str().to_string(),
            content: message.content.as_str().to_string(),
            username: message.username.as_str().to_string(),
            timestamp: message.timestamp.value(),
            sender_id: message.sender_id.as_str().to_string(),
        }
    }
}

impl From<&PlaybackSnapshot> for dto::PlaybackSnapshotDto {
    fn from(snapshot: &PlaybackSnapshot) -> Self {
        let (url, video_id) = snapshot
            .video
            .as_ref()
            .map(|v| (v.url.as_str().to_string(), v.video_id.as_str().to_string()))
            .unwrap_or_default();
        Self {
            url,
            video_id,
            is_playing: snapshot.is_playing,
            current_time: snapshot.current_time.seconds(),
            last_update: snapshot.last_update.value(),
        }
    }
}

impl From<&Poll> for dto::PollDto {
    fn from(poll: &Poll) -> Self {
        Self {
            id: poll.id.value(),
            options: poll.options.iter().map(|o| o.as_str().to_string()).collect(),
            start_time: poll.start_time.value(),
        }
    }
}

impl From<&Vote> for dto::PollResultDto {
    fn from(vote: &Vote) -> Self {
        Self {
            user: vote.username.as_str().to_string(),
            option: vote.option.as_str().to_string(),
        }
    }
}

impl From<&SessionEvent> for dto::ServerEvent {
    fn from(event: &SessionEvent) -> Self {
        use SessionEvent as D;

        match event {
            D::SystemMessage { message, timestamp } => Self::SystemMessage {
                message: message.clone(),
                timestamp: timestamp.value(),
            },
            D::UserCount(n) => Self::UserCount { n: *n },
            D::NewMessage(message) => Self::NewMessage(message.into()),
            D::TriggerEffect { trigger, user } => Self::TriggerEffect {
                trigger: trigger.to_string(),
                user: user.to_string(),
            },
            D::VideoLoaded {
                url,
                video_id,
                user,
            } => Self::VideoLoaded {
                url: url.as_str().to_string(),
                video_id: video_id.as_str().to_string(),
                user: user.to_string(),
            },
            D::VideoSync(snapshot) => Self::VideoSync(snapshot.into()),
            D::PlayPauseSync {
                is_playing,
                current_time,
                user,
            } => Self::VideoPlaypauseSync {
                is_playing: *is_playing,
                current_time: current_time.seconds(),
                user: user.to_string(),
            },
            D::ProgressSync { current_time } => Self::VideoProgressSync {
                current_time: current_time.seconds(),
            },
            D::Seek { current_time, user } => Self::VideoSeek {
                current_time: current_time.seconds(),
                user: user.to_string(),
            },
            D::SyncRequested { user } => Self::SyncRequested {
                user: user.to_string(),
            },
            D::AwardGiven { award, user } => Self::AwardGiven {
                award: award.as_str().to_string(),
                user: user.to_string(),
            },
            D::SurprisePopup { message, user } => Self::SurprisePopup {
                message: message.as_str().to_string(),
                user: user.to_string(),
            },
            D::UserTyping {
                username,
                is_typing,
            } => Self::UserTyping {
                username: username.to_string(),
                is_typing: *is_typing,
            },
            D::PollStarted(poll) => Self::PollStarted(poll.into()),
            D::PollVote { user, option } => Self::PollVote {
                user: user.to_string(),
                option: option.as_str().to_string(),
            },
            D::PollEnded { results } => Self::PollEnded {
                results: results.iter().map(Into::into).collect(),
            },
        }
    }
}
