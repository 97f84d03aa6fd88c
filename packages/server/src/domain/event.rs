//! ドメインモデル: 送信イベントと宛先
//!
//! コンポーネントは通信路に直接触らない。イベントと宛先を組にした `Delivery` を返し、
//! usecase 層がそれを `BroadcastRouter` に渡す。

use super::{
    entity::{ChatMessage, PlaybackSnapshot, Poll, Vote},
    value_object::{
        Award, ConnectionId, MessageContent, PlaybackTime, PollOption, Timestamp, Username,
        VideoId, VideoUrl,
    },
};

/// Event pushed from the server to one or more connections
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// 参加・退出・再生操作などのアナウンス
    SystemMessage {
        message: String,
        timestamp: Timestamp,
    },
    /// Number of joined participants
    UserCount(usize),
    NewMessage(ChatMessage),
    /// Cosmetic effect triggered by a vocabulary word in a chat message
    TriggerEffect {
        trigger: &'static str,
        user: Username,
    },
    VideoLoaded {
        url: VideoUrl,
        video_id: VideoId,
        user: Username,
    },
    /// Full playback snapshot
    VideoSync(PlaybackSnapshot),
    /// 操作した本人以外へ
    PlayPauseSync {
        is_playing: bool,
        current_time: PlaybackTime,
        user: Username,
    },
    /// Ambient progress heartbeat
    ProgressSync { current_time: PlaybackTime },
    Seek {
        current_time: PlaybackTime,
        user: Username,
    },
    SyncRequested { user: Username },
    AwardGiven { award: Award, user: Username },
    SurprisePopup {
        message: MessageContent,
        user: Username,
    },
    UserTyping { username: Username, is_typing: bool },
    PollStarted(Poll),
    PollVote { user: Username, option: PollOption },
    /// Final tally in vote insertion order
    PollEnded { results: Vec<Vote> },
}

/// Fan-out target of a single event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipients {
    /// Every connected client, the sender included
    All,
    /// Every connected client except the given one
    AllExcept(ConnectionId),
    /// Only the given client
    Only(ConnectionId),
}

/// An event together with who receives it
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    /// 宛先
    pub recipients: Recipients,
    pub event: SessionEvent,
}

impl Delivery {
    pub fn to_all(event: SessionEvent) -> Self {
        Self {
            recipients: Recipients::All,
            event,
        }
    }

    pub fn to_all_except(exclude: ConnectionId, event: SessionEvent) -> Self {
        Self {
            recipients: Recipients::AllExcept(exclude),
            event,
        }
    }

    pub fn to_one(target: ConnectionId, event: SessionEvent) -> Self {
        Self {
            recipients: Recipients::Only(target),
            event,
        }
    }
}
