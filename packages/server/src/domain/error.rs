//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::PollId;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// Username validation error
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// Username too long error
    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },

    /// VideoUrl validation error
    #[error("VideoUrl cannot be empty")]
    VideoUrlEmpty,

    /// VideoUrl too long error
    #[error("VideoUrl cannot exceed {max} characters (got {actual})")]
    VideoUrlTooLong { max: usize, actual: usize },

    /// VideoId validation error
    #[error("VideoId cannot be empty")]
    VideoIdEmpty,

    /// VideoId too long error
    #[error("VideoId cannot exceed {max} characters (got {actual})")]
    VideoIdTooLong { max: usize, actual: usize },

    /// PlaybackTime must be a finite, non-negative number of seconds
    #[error("PlaybackTime must be a finite number >= 0 (got {0})")]
    PlaybackTimeInvalid(f64),

    /// PollOption validation error
    #[error("PollOption cannot be empty")]
    PollOptionEmpty,

    /// PollOption too long error
    #[error("PollOption cannot exceed {max} characters (got {actual})")]
    PollOptionTooLong { max: usize, actual: usize },

    /// Poll option count out of range
    #[error("Poll must have between {min} and {max} options (got {actual})")]
    PollOptionCount {
        min: usize,
        max: usize,
        actual: usize,
    },

    /// Award validation error
    #[error("Award cannot be empty")]
    AwardEmpty,

    /// Award too long error
    #[error("Award cannot exceed {max} characters (got {actual})")]
    AwardTooLong { max: usize, actual: usize },
}

/// Reasons a poll vote is dropped
///
/// Rejected votes never produce a broadcast; callers only log them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PollError {
    /// No poll is currently active
    #[error("no poll is active")]
    NoActivePoll,

    /// Vote references a poll other than the active one
    #[error("poll {requested} is not the active poll ({active})")]
    StalePoll { requested: PollId, active: PollId },
}
