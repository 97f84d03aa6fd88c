//! UseCase: チャットメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 履歴への追加、送信者を含む全員への配信、トリガーエフェクト
//!
//! ### どのような状況を想定しているか
//! - 正常系：トリガー語を含まないメッセージ
//! - 正常系：複数のトリガー語を含むメッセージ
//! - エッジケース：履歴の上限を超えたときの古いメッセージの破棄

use std::sync::Arc;

use crate::domain::{BroadcastRouter, ConnectionId, MessageContent, Username};

use super::{SharedSession, apply};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    session: SharedSession,
    router: Arc<dyn BroadcastRouter>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(session: SharedSession, router: Arc<dyn BroadcastRouter>) -> Self {
        Self { session, router }
    }

    /// メッセージ送信を実行
    ///
    /// 表示名はメッセージに添えられたものを使う（join 時の名前とは独立）。
    pub async fn execute(
        &self,
        sender: ConnectionId,
        content: MessageContent,
        username: Username,
    ) {
        tracing::debug!("'{}' sent a message as '{}'", sender, username);
        apply(&self.session, &*self.router, move |session| {
            session.send_message(sender, content, username)
        })
        .await;
    }
}
