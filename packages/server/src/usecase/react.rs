//! UseCase: リアクション（アワード・サプライズ・入力中表示）

use std::sync::Arc;

use crate::domain::{Award, BroadcastRouter, ConnectionId, MessageContent};

use super::{SharedSession, apply};

/// 状態を持たないリアクションのユースケース
pub struct ReactUseCase {
    session: SharedSession,
    router: Arc<dyn BroadcastRouter>,
}

impl ReactUseCase {
    /// 新しい ReactUseCase を作成
    pub fn new(session: SharedSession, router: Arc<dyn BroadcastRouter>) -> Self {
        Self { session, router }
    }

    pub async fn give_award(&self, sender: ConnectionId, award: Award) {
        apply(&self.session, &*self.router, move |session| {
            session.give_award(&sender, award)
        })
        .await;
    }

    pub async fn surprise(&self, sender: ConnectionId, message: MessageContent) {
        apply(&self.session, &*self.router, move |session| {
            session.surprise(&sender, message)
        })
        .await;
    }

    pub async fn typing(&self, sender: ConnectionId, is_typing: bool) {
        apply(&self.session, &*self.router, move |session| {
            session.typing(&sender, is_typing)
        })
        .await;
    }
}
