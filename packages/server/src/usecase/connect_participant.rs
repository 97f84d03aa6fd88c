//! UseCase: 接続と参加（join）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() / join() メソッド
//! - 接続の Router への登録と、join 時のリプレイ
//!
//! ### なぜこのテストが必要か
//! - 後から参加した人が現在の再生状態とチャット履歴を受け取れることを保証
//! - アナウンスと参加者数が全員に届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のセッションへの join
//! - 正常系：動画ロード済み・履歴ありのセッションへの join
//! - エッジケース：同じ接続からの再 join（上書き）

use std::sync::Arc;

use crate::domain::{BroadcastRouter, ConnectionId, PusherChannel, Username};

use super::{SharedSession, apply};

/// 接続と参加のユースケース
pub struct ConnectParticipantUseCase {
    session: SharedSession,
    router: Arc<dyn BroadcastRouter>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(session: SharedSession, router: Arc<dyn BroadcastRouter>) -> Self {
        Self { session, router }
    }

    /// 接続を配信対象として登録
    ///
    /// 登録しただけではセッションには参加していない（参加者数にも数えない）。
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.router.register_client(connection_id, sender).await;
    }

    /// セッションに参加
    ///
    /// 全員へのアナウンス、本人へのスナップショットと履歴のリプレイ、
    /// 全員への参加者数をこの順で配信する。
    pub async fn join(&self, connection_id: ConnectionId, username: Username) {
        tracing::info!("'{}' joined as '{}'", connection_id, username);
        apply(&self.session, &*self.router, move |session| {
            session.join(connection_id, username)
        })
        .await;
    }
}
