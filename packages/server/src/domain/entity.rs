//! ドメインモデル: エンティティ
//!
//! 参加者・チャットメッセージ・再生状態・投票を表す。
//! どれも検証済みの値オブジェクトだけで組み立てるので、ここでの再検証はしない。

use super::value_object::{
    ConnectionId, MessageContent, PlaybackTime, PollId, PollOption, Timestamp, Username,
    VideoId, VideoUrl,
};

/// A participant currently joined to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Connection the participant joined through
    pub connection_id: ConnectionId,
    /// Display name shown to the other participants
    pub username: Username,
}

impl Participant {
    /// Create a new participant
    pub fn new(connection_id: ConnectionId, username: Username) -> Self {
        Self {
            connection_id,
            username,
        }
    }
}

/// A chat message stored in the session history
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Message body
    pub content: MessageContent,
    /// Display name the sender attached to the message
    pub username: Username,
    /// Time the server accepted the message
    pub timestamp: Timestamp,
    /// Connection that sent the message (doubles as the message id)
    pub sender_id: ConnectionId,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(
        content: MessageContent,
        username: Username,
        timestamp: Timestamp,
        sender_id: ConnectionId,
    ) -> Self {
        Self {
            content,
            username,
            timestamp,
            sender_id,
        }
    }
}

/// The video currently loaded into the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedVideo {
    /// 読み込まれた動画の URL
    pub url: VideoUrl,
    /// プレイヤーが使う動画 ID
    pub video_id: VideoId,
}

/// Complete playback state, sent wholesale to clients
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    /// `None` while no video has been loaded
    pub video: Option<LoadedVideo>,
    /// 動画未ロードの間は常に false
    pub is_playing: bool,
    pub current_time: PlaybackTime,
    /// Time of the most recently applied mutation
    pub last_update: Timestamp,
}

impl PlaybackSnapshot {
    /// Snapshot of a session with no video loaded
    pub fn empty(now: Timestamp) -> Self {
        Self {
            video: None,
            is_playing: false,
            current_time: PlaybackTime::ZERO,
            last_update: now,
        }
    }

    /// Whether a video has been loaded
    pub fn is_loaded(&self) -> bool {
        self.video.is_some()
    }
}

/// A poll descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poll {
    /// 開始ごとに採番される。古い id への票は受け付けない
    pub id: PollId,
    /// Options in the order the poll creator listed them
    pub options: Vec<PollOption>,
    /// 開始時刻
    pub start_time: Timestamp,
}

impl Poll {
    /// Whether `option` is one of the answers this poll offers
    pub fn offers(&self, option: &PollOption) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// 1 接続につき 1 票
///
/// 同じ接続から再投票すると上書きされる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    /// 投票時に名乗った名前
    pub username: Username,
    /// 選んだ選択肢（一覧にないものもそのまま残る）
    pub option: PollOption,
}
