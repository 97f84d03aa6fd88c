//! PlaybackState: 共有動画再生状態のステートマシン
//!
//! ## 状態
//!
//! - Empty: 動画未ロード（`video` が `None`）。`is_playing` は常に false
//! - Loaded: 動画ロード済み（`is_playing` で再生中 / 一時停止中）
//!
//! ## 競合ポリシー
//!
//! 後勝ち（last-write-wins）。状態は 1 つの可変レコードで、
//! 処理された順に上書きされます。ベクタークロックや因果順序は扱いません。

use super::{
    entity::{LoadedVideo, PlaybackSnapshot},
    event::{Delivery, SessionEvent},
    value_object::{ConnectionId, PlaybackTime, Timestamp, Username, VideoId, VideoUrl},
};

/// 共有再生状態
#[derive(Debug)]
pub struct PlaybackState {
    snapshot: PlaybackSnapshot,
}

impl PlaybackState {
    pub fn new(now: Timestamp) -> Self {
        Self {
            snapshot: PlaybackSnapshot::empty(now),
        }
    }

    /// 現在のスナップショット
    pub fn snapshot(&self) -> &PlaybackSnapshot {
        &self.snapshot
    }

    fn sync_to_all(&self) -> Delivery {
        Delivery::to_all(SessionEvent::VideoSync(self.snapshot.clone()))
    }

    /// 動画をロードする（一時停止・0 秒にリセット）
    ///
    /// ロードした人の表示名付きの "video loaded" と、スナップショットを全員へ。
    pub fn load_video(
        &mut self,
        url: VideoUrl,
        video_id: VideoId,
        user: Username,
        now: Timestamp,
    ) -> Vec<Delivery> {
        self.snapshot = PlaybackSnapshot {
            video: Some(LoadedVideo {
                url: url.clone(),
                video_id: video_id.clone(),
            }),
            is_playing: false,
            current_time: PlaybackTime::ZERO,
            last_update: now,
        };

        vec![
            Delivery::to_all(SessionEvent::VideoLoaded {
                url,
                video_id,
                user,
            }),
            self.sync_to_all(),
        ]
    }

    /// 再生 / 一時停止
    ///
    /// 送信者以外へ同期イベント、全員へシステムメッセージ。
    pub fn set_play_pause(
        &mut self,
        sender: &ConnectionId,
        user: Username,
        is_playing: bool,
        current_time: PlaybackTime,
        now: Timestamp,
    ) -> Vec<Delivery> {
        // Empty の間は再生状態を保持しない
        self.snapshot.is_playing = is_playing && self.snapshot.is_loaded();
        self.snapshot.current_time = current_time;
        self.snapshot.last_update = now;

        let verb = if is_playing {
            "played ▶️"
        } else {
            "paused ⏸️"
        };
        let message = format!("{} {} the video.", user, verb);

        vec![
            Delivery::to_all_except(
                sender.clone(),
                SessionEvent::PlayPauseSync {
                    is_playing,
                    current_time,
                    user,
                },
            ),
            Delivery::to_all(SessionEvent::SystemMessage {
                message,
                timestamp: now,
            }),
        ]
    }

    /// 再生位置のハートビート（高頻度・ベストエフォート）
    ///
    /// 時刻のみを送信者以外へ。システムメッセージもスナップショットも送らない。
    pub fn report_progress(
        &mut self,
        sender: &ConnectionId,
        current_time: PlaybackTime,
        now: Timestamp,
    ) -> Vec<Delivery> {
        self.snapshot.current_time = current_time;
        self.snapshot.last_update = now;

        vec![Delivery::to_all_except(
            sender.clone(),
            SessionEvent::ProgressSync { current_time },
        )]
    }

    /// シーク（ユーザーの明示的な操作なので表示名付き）
    pub fn seek(
        &mut self,
        sender: &ConnectionId,
        user: Username,
        current_time: PlaybackTime,
        now: Timestamp,
    ) -> Vec<Delivery> {
        self.snapshot.current_time = current_time;
        self.snapshot.last_update = now;

        vec![Delivery::to_all_except(
            sender.clone(),
            SessionEvent::Seek { current_time, user },
        )]
    }

    /// 再同期リクエスト
    ///
    /// リクエスト元が観測した時刻・再生状態を送ってきた場合は、それを正として採用する。
    /// その後、リクエスト元の表示名付きアナウンスとスナップショットを全員へ。
    pub fn sync_request(
        &mut self,
        user: Username,
        client_time: Option<PlaybackTime>,
        client_is_playing: Option<bool>,
        now: Timestamp,
    ) -> Vec<Delivery> {
        if let Some(current_time) = client_time {
            self.snapshot.current_time = current_time;
        }
        if let Some(is_playing) = client_is_playing {
            self.snapshot.is_playing = is_playing && self.snapshot.is_loaded();
        }
        if client_time.is_some() || client_is_playing.is_some() {
            self.snapshot.last_update = now;
        }

        vec![
            Delivery::to_all(SessionEvent::SyncRequested { user }),
            self.sync_to_all(),
        ]
    }

    /// 参加時のリプレイ（動画ロード済みの場合のみ、参加者本人へ）
    pub fn replay_to(&self, connection_id: &ConnectionId) -> Option<Delivery> {
        self.snapshot.is_loaded().then(|| {
            Delivery::to_one(
                connection_id.clone(),
                SessionEvent::VideoSync(self.snapshot.clone()),
            )
        })
    }
}
