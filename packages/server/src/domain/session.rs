//! Session: 視聴セッション全体のコンテキスト
//!
//! 4 つのコンポーネント（SessionRegistry, ChatLog, PlaybackState, PollEngine）と
//! Clock を保持する明示的なコンテキストオブジェクトです。グローバル変数は使わず、
//! プロセスが所有して各ハンドラに渡します。
//!
//! 全ての操作は `Vec<Delivery>` を返し、配信は呼び出し側（UseCase 層）が行います。
//! 呼び出し側は 1 つの操作とその配信が完了するまで次の操作を始めてはいけません。

use std::sync::Arc;

use sajiki_shared::time::Clock;

use super::{
    chat_log::ChatLog,
    error::PollError,
    event::{Delivery, SessionEvent},
    playback::PlaybackState,
    poll::PollEngine,
    registry::SessionRegistry,
    value_object::{
        Award, ConnectionId, MessageContent, PlaybackTime, PollId, PollOption, Timestamp,
        Username, VideoId, VideoUrl,
    },
};

/// 視聴セッション
pub struct Session {
    registry: SessionRegistry,
    chat_log: ChatLog,
    playback: PlaybackState,
    polls: PollEngine,
    clock: Arc<dyn Clock>,
    created_at: Timestamp,
}

impl Session {
    /// 空のセッションを作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let created_at = Timestamp::new(clock.now_millis());
        Self {
            registry: SessionRegistry::new(),
            chat_log: ChatLog::new(),
            playback: PlaybackState::new(created_at),
            polls: PollEngine::new(),
            clock,
            created_at,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn chat_log(&self) -> &ChatLog {
        &self.chat_log
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn polls(&self) -> &PollEngine {
        &self.polls
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// 参加
    ///
    /// 1. 参加アナウンスを全員へ
    /// 2. 動画ロード済みならスナップショットを本人へ
    /// 3. チャット履歴を本人へ
    /// 4. 参加者数を全員へ
    pub fn join(&mut self, connection_id: ConnectionId, username: Username) -> Vec<Delivery> {
        let now = self.now();
        let mut deliveries = vec![self.registry.join(connection_id.clone(), username, now)];
        deliveries.extend(self.playback.replay_to(&connection_id));
        deliveries.extend(self.chat_log.replay_to(&connection_id));
        deliveries.push(self.registry.count_update());
        deliveries
    }

    /// 退出（切断時のクリーンアップ）
    pub fn leave(&mut self, connection_id: &ConnectionId) -> Vec<Delivery> {
        let now = self.now();
        self.registry.leave(connection_id, now)
    }

    /// チャットメッセージ送信
    pub fn send_message(
        &mut self,
        sender: ConnectionId,
        content: MessageContent,
        username: Username,
    ) -> Vec<Delivery> {
        let now = self.now();
        self.chat_log.append(content, username, sender, now)
    }

    pub fn load_video(
        &mut self,
        sender: &ConnectionId,
        url: VideoUrl,
        video_id: VideoId,
    ) -> Vec<Delivery> {
        let now = self.now();
        let user = self.registry.display_name(sender);
        self.playback.load_video(url, video_id, user, now)
    }

    pub fn set_play_pause(
        &mut self,
        sender: &ConnectionId,
        is_playing: bool,
        current_time: PlaybackTime,
    ) -> Vec<Delivery> {
        let now = self.now();
        let user = self.registry.display_name(sender);
        self.playback
            .set_play_pause(sender, user, is_playing, current_time, now)
    }

    pub fn report_progress(
        &mut self,
        sender: &ConnectionId,
        current_time: PlaybackTime,
    ) -> Vec<Delivery> {
        let now = self.now();
        self.playback.report_progress(sender, current_time, now)
    }

    pub fn seek(&mut self, sender: &ConnectionId, current_time: PlaybackTime) -> Vec<Delivery> {
        let now = self.now();
        let user = self.registry.display_name(sender);
        self.playback.seek(sender, user, current_time, now)
    }

    pub fn sync_request(
        &mut self,
        sender: &ConnectionId,
        client_time: Option<PlaybackTime>,
        client_is_playing: Option<bool>,
    ) -> Vec<Delivery> {
        let now = self.now();
        let user = self.registry.display_name(sender);
        self.playback
            .sync_request(user, client_time, client_is_playing, now)
    }

    /// アワードを全員へ
    pub fn give_award(&mut self, sender: &ConnectionId, award: Award) -> Vec<Delivery> {
        let user = self.registry.display_name(sender);
        vec![Delivery::to_all(SessionEvent::AwardGiven { award, user })]
    }

    /// サプライズポップアップを全員へ
    pub fn surprise(&mut self, sender: &ConnectionId, message: MessageContent) -> Vec<Delivery> {
        let user = self.registry.display_name(sender);
        vec![Delivery::to_all(SessionEvent::SurprisePopup { message, user })]
    }

    /// 入力中インジケーター
    ///
    /// join していない接続からの通知は無視する。
    pub fn typing(&mut self, sender: &ConnectionId, is_typing: bool) -> Vec<Delivery> {
        let Some(participant) = self.registry.lookup(sender) else {
            return Vec::new();
        };
        vec![Delivery::to_all_except(
            sender.clone(),
            SessionEvent::UserTyping {
                username: participant.username.clone(),
                is_typing,
            },
        )]
    }

    pub fn start_poll(&mut self, options: Vec<PollOption>) -> Vec<Delivery> {
        let now = self.now();
        self.polls.start(options, now)
    }

    pub fn vote(
        &mut self,
        sender: ConnectionId,
        poll_id: PollId,
        option: PollOption,
        username: Username,
    ) -> Result<Vec<Delivery>, PollError> {
        self.polls.vote(sender, poll_id, option, username)
    }

    pub fn end_poll(&mut self) -> Vec<Delivery> {
        self.polls.end()
    }
}
