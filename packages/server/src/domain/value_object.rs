//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity. Every inbound payload
//! field passes through one of these constructors before it reaches a
//! component, so a constructed value is always valid.

use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of a display name (characters)
pub const USERNAME_MAX_LEN: usize = 50;
/// Maximum length of a chat message or surprise message (characters)
pub const MESSAGE_CONTENT_MAX_LEN: usize = 2000;
/// Maximum length of a video URL (characters)
pub const VIDEO_URL_MAX_LEN: usize = 2048;
/// Maximum length of a video identifier (characters)
pub const VIDEO_ID_MAX_LEN: usize = 200;
/// Maximum length of a single poll option (characters)
pub const POLL_OPTION_MAX_LEN: usize = 200;
/// Fewest options a poll may offer
pub const MIN_POLL_OPTIONS: usize = 2;
/// Most options a poll may offer
pub const MAX_POLL_OPTIONS: usize = 10;
/// Maximum length of an award name (characters)
pub const AWARD_MAX_LEN: usize = 100;

/// Check that `value` is non-blank and at most `max` characters long.
///
/// `Err(None)` means blank, `Err(Some(len))` means too long, so callers can
/// map each case to their own error variant.
fn check_length(value: &str, max: usize) -> Result<(), Option<usize>> {
    if value.trim().is_empty() {
        return Err(None);
    }
    let len = value.chars().count();
    if len > max {
        return Err(Some(len));
    }
    Ok(())
}

/// Connection identifier value object.
///
/// Identifies one live transport connection. Assigned by the server when the
/// WebSocket is upgraded; never supplied by clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Create a new ConnectionId.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Label used wherever a participant cannot be found in the registry
pub const FALLBACK_DISPLAY_NAME: &str = "Someone";

/// Display name value object.
///
/// Surrounding whitespace is trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// The display name substituted for connections that never joined.
    pub fn fallback() -> Self {
        Self(FALLBACK_DISPLAY_NAME.to_string())
    }

    /// Create a new Username.
    ///
    /// # Arguments
    ///
    /// * `name` - The display name chosen by the participant
    ///
    /// # Returns
    ///
    /// A Result containing the Username or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        let trimmed = name.trim();
        match check_length(trimmed, USERNAME_MAX_LEN) {
            Ok(()) => Ok(Self(trimmed.to_string())),
            Err(None) => Err(ValueObjectError::UsernameEmpty),
            Err(Some(actual)) => Err(ValueObjectError::UsernameTooLong {
                max: USERNAME_MAX_LEN,
                actual,
            }),
        }
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message content value object.
///
/// Used for chat messages and surprise pop-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create a new MessageContent.
    pub fn new(content: String) -> Result<Self, ValueObjectError> {
        match check_length(&content, MESSAGE_CONTENT_MAX_LEN) {
            Ok(()) => Ok(Self(content)),
            Err(None) => Err(ValueObjectError::MessageContentEmpty),
            Err(Some(actual)) => Err(ValueObjectError::MessageContentTooLong {
                max: MESSAGE_CONTENT_MAX_LEN,
                actual,
            }),
        }
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Video URL value object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUrl(String);

impl VideoUrl {
    pub fn new(url: String) -> Result<Self, ValueObjectError> {
        match check_length(&url, VIDEO_URL_MAX_LEN) {
            Ok(()) => Ok(Self(url)),
            Err(None) => Err(ValueObjectError::VideoUrlEmpty),
            Err(Some(actual)) => Err(ValueObjectError::VideoUrlTooLong {
                max: VIDEO_URL_MAX_LEN,
                actual,
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Video identifier value object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        match check_length(&id, VIDEO_ID_MAX_LEN) {
            Ok(()) => Ok(Self(id)),
            Err(None) => Err(ValueObjectError::VideoIdEmpty),
            Err(Some(actual)) => Err(ValueObjectError::VideoIdTooLong {
                max: VIDEO_ID_MAX_LEN,
                actual,
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Playback position in seconds.
///
/// Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct PlaybackTime(f64);

impl PlaybackTime {
    /// The start of the video
    pub const ZERO: Self = Self(0.0);

    /// Create a new PlaybackTime.
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::PlaybackTimeInvalid` for NaN, infinite or negative values.
    pub fn new(seconds: f64) -> Result<Self, ValueObjectError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ValueObjectError::PlaybackTimeInvalid(seconds));
        }
        Ok(Self(seconds))
    }

    /// Get the position in seconds.
    pub fn seconds(&self) -> f64 {
        self.0
    }
}

/// Poll identifier value object.
///
/// Issued by `PollIdFactory`; strictly increasing within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PollId(u64);

impl PollId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single answer offered by a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOption(String);

impl PollOption {
    pub fn new(option: String) -> Result<Self, ValueObjectError> {
        match check_length(&option, POLL_OPTION_MAX_LEN) {
            Ok(()) => Ok(Self(option)),
            Err(None) => Err(ValueObjectError::PollOptionEmpty),
            Err(Some(actual)) => Err(ValueObjectError::PollOptionTooLong {
                max: POLL_OPTION_MAX_LEN,
                actual,
            }),
        }
    }

    /// Validate the full option list of a new poll.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid option, or when the list has fewer than
    /// `MIN_POLL_OPTIONS` or more than `MAX_POLL_OPTIONS` entries.
    pub fn parse_all(options: Vec<String>) -> Result<Vec<Self>, ValueObjectError> {
        let actual = options.len();
        if !(MIN_POLL_OPTIONS..=MAX_POLL_OPTIONS).contains(&actual) {
            return Err(ValueObjectError::PollOptionCount {
                min: MIN_POLL_OPTIONS,
                max: MAX_POLL_OPTIONS,
                actual,
            });
        }
        options.into_iter().map(Self::new).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Name of a cosmetic award handed out by a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Award(String);

impl Award {
    pub fn new(award: String) -> Result<Self, ValueObjectError> {
        match check_length(&award, AWARD_MAX_LEN) {
            Ok(()) => Ok(Self(award)),
            Err(None) => Err(ValueObjectError::AwardEmpty),
            Err(Some(actual)) => Err(ValueObjectError::AwardTooLong {
                max: AWARD_MAX_LEN,
                actual,
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Timestamp value object.
///
/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    /// Get the inner value (milliseconds).
    pub fn value(&self) -> i64 {
        self.0
    }
}
