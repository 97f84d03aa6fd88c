//! UseCase: 再生状態の同期処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - load_video / set_play_pause / report_progress / seek / sync_request
//! - 誰に何が届くか（送信者を除外するもの、全員に届くもの）
//!
//! ### なぜこのテストが必要か
//! - 送信者に自分の操作がエコーされると、クライアント側でフィードバックループが起きる
//! - 後から参加した人が正しいスナップショットを受け取るには、サーバー側の状態更新が必須

use std::sync::Arc;

use crate::domain::{BroadcastRouter, ConnectionId, PlaybackTime, VideoId, VideoUrl};

use super::{SharedSession, apply};

/// 再生操作のユースケース
pub struct ControlPlaybackUseCase {
    session: SharedSession,
    router: Arc<dyn BroadcastRouter>,
}

impl ControlPlaybackUseCase {
    /// 新しい ControlPlaybackUseCase を作成
    pub fn new(session: SharedSession, router: Arc<dyn BroadcastRouter>) -> Self {
        Self { session, router }
    }

    /// 動画をロード（一時停止・0 秒から）
    pub async fn load_video(&self, sender: ConnectionId, url: VideoUrl, video_id: VideoId) {
        tracing::info!("'{}' loaded video '{}'", sender, video_id.as_str());
        apply(&self.session, &*self.router, move |session| {
            session.load_video(&sender, url, video_id)
        })
        .await;
    }

    /// 再生 / 一時停止
    pub async fn set_play_pause(
        &self,
        sender: ConnectionId,
        is_playing: bool,
        current_time: PlaybackTime,
    ) {
        tracing::debug!(
            "'{}' set playing={} at {}s",
            sender,
            is_playing,
            current_time.seconds()
        );
        apply(&self.session, &*self.router, move |session| {
            session.set_play_pause(&sender, is_playing, current_time)
        })
        .await;
    }

    /// 再生位置のハートビート
    pub async fn report_progress(&self, sender: ConnectionId, current_time: PlaybackTime) {
        apply(&self.session, &*self.router, move |session| {
            session.report_progress(&sender, current_time)
        })
        .await;
    }

    /// シーク
    pub async fn seek(&self, sender: ConnectionId, current_time: PlaybackTime) {
        tracing::debug!("'{}' seeked to {}s", sender, current_time.seconds());
        apply(&self.session, &*self.router, move |session| {
            session.seek(&sender, current_time)
        })
        .await;
    }

    /// 再同期リクエスト
    pub async fn sync_request(
        &self,
        sender: ConnectionId,
        current_time: Option<PlaybackTime>,
        is_playing: Option<bool>,
    ) {
        tracing::debug!("'{}' requested a resync", sender);
        apply(&self.session, &*self.router, move |session| {
            session.sync_request(&sender, current_time, is_playing)
        })
        .await;
    }
}
