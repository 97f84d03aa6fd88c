//! UseCase: 投票（poll）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - start / vote / end
//! - 不正な投票（投票なし・古い poll id）が何も配信しないこと
//!
//! ### なぜこのテストが必要か
//! - 投票の置き換えや終了後に届いた古い票が集計を汚さないことを保証

use std::sync::Arc;

use crate::domain::{BroadcastRouter, ConnectionId, PollId, PollOption, Username, deliver};

use super::{SharedSession, apply};

/// 投票のユースケース
pub struct RunPollUseCase {
    session: SharedSession,
    router: Arc<dyn BroadcastRouter>,
}

impl RunPollUseCase {
    /// 新しい RunPollUseCase を作成
    pub fn new(session: SharedSession, router: Arc<dyn BroadcastRouter>) -> Self {
        Self { session, router }
    }

    /// 投票を開始（アクティブな投票があれば置き換える）
    pub async fn start(&self, options: Vec<PollOption>) {
        apply(&self.session, &*self.router, move |session| {
            session.start_poll(options)
        })
        .await;
    }

    /// 投票する
    ///
    /// 拒否された票はログに残すだけで、誰にも何も送らない。
    pub async fn vote(
        &self,
        sender: ConnectionId,
        poll_id: PollId,
        option: PollOption,
        user: Username,
    ) {
        let mut session = self.session.lock().await;
        match session.vote(sender.clone(), poll_id, option, user) {
            Ok(deliveries) => deliver(&*self.router, deliveries).await,
            Err(e) => tracing::debug!("Vote from '{}' rejected: {}", sender, e),
        }
    }

    /// 投票を終了し、集計を全員へ
    pub async fn end(&self) {
        apply(&self.session, &*self.router, |session| session.end_poll()).await;
    }
}
