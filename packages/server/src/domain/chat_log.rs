//! ChatLog: 上限付きのメッセージ履歴とリアクショントリガー検出
//!
//! 履歴は最大 50 件で、超えた分は古いものから削除されます（FIFO）。

use std::collections::VecDeque;

use super::{
    entity::ChatMessage,
    event::{Delivery, SessionEvent},
    value_object::{ConnectionId, MessageContent, Timestamp, Username},
};

/// 履歴として保持するメッセージの最大件数
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// リアクションエフェクトを発火させる単語（検出順）
pub const TRIGGER_WORDS: [&str; 15] = [
    "heart",
    "love",
    "lol",
    "lmao",
    "haha",
    "cute",
    "beautiful",
    "amazing",
    "wow",
    "fire",
    "based",
    "cringe",
    "poggers",
    "nice",
    "wholesome",
];

/// メッセージ本文に含まれるトリガー単語を検出する
///
/// 小文字化した本文に対する部分一致。同じ単語が何度出現しても 1 回だけ返す。
pub fn detect_triggers(content: &str) -> Vec<&'static str> {
    let lower = content.to_lowercase();
    TRIGGER_WORDS
        .iter()
        .copied()
        .filter(|trigger| lower.contains(trigger))
        .collect()
}

/// チャット履歴
#[derive(Debug)]
pub struct ChatLog {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// メッセージを履歴に追加し、配信内容を返す
    ///
    /// 1. 新しいメッセージを全員へ（送信者を含む）
    /// 2. 検出したトリガー単語ごとにエフェクトを全員へ
    pub fn append(
        &mut self,
        content: MessageContent,
        username: Username,
        sender_id: ConnectionId,
        now: Timestamp,
    ) -> Vec<Delivery> {
        let triggers = detect_triggers(content.as_str());
        let message = ChatMessage::new(content, username.clone(), now, sender_id);

        self.messages.push_back(message.clone());
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }

        let mut deliveries = vec![Delivery::to_all(SessionEvent::NewMessage(message))];
        deliveries.extend(triggers.into_iter().map(|trigger| {
            Delivery::to_all(SessionEvent::TriggerEffect {
                trigger,
                user: username.clone(),
            })
        }));
        deliveries
    }

    /// 参加したばかりの接続に履歴を古い順に送る
    pub fn replay_to(&self, connection_id: &ConnectionId) -> Vec<Delivery> {
        self.messages
            .iter()
            .map(|message| {
                Delivery::to_one(
                    connection_id.clone(),
                    SessionEvent::NewMessage(message.clone()),
                )
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}
