//! WebSocket を使った BroadcastRouter 実装
//!
//! ## 責務
//!
//! - 接続ごとの `PusherChannel` を管理
//! - `SessionEvent` を JSON フレームにシリアライズし、配信対象のチャンネルへ送る
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された送信チャンネルを受け取り、フレームを流すだけです。
//! 実際のソケット書き込みは接続ごとの writer タスクが行うため、
//! 遅い受信者がハンドラや他の受信者を待たせることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{BroadcastRouter, ConnectionId, PusherChannel, SessionEvent},
    infrastructure::dto::websocket::ServerEvent,
};

/// WebSocket を使った BroadcastRouter 実装
pub struct WebSocketBroadcastRouter {
    /// 接続中のクライアントの送信チャンネル
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketBroadcastRouter {
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }

    /// 登録済みの接続数
    pub async fn client_count(&self) -> usize {
        self.clients.lock().await.len()
    }

    /// イベントを 1 度だけシリアライズする
    fn encode(event: &SessionEvent) -> Option<String> {
        match serde_json::to_string(&ServerEvent::from(event)) {
            Ok(frame) => Some(frame),
            Err(e) => {
                tracing::error!("Failed to serialize event {:?}: {}", event, e);
                None
            }
        }
    }

    fn push(connection_id: &ConnectionId, sender: &PusherChannel, frame: &str) {
        // 送信失敗（切断済み）は他の受信者への配信を妨げない
        if let Err(e) = sender.send(frame.to_string()) {
            tracing::warn!("Failed to push frame to '{}': {}", connection_id, e);
        }
    }
}

#[async_trait]
impl BroadcastRouter for WebSocketBroadcastRouter {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Connection '{}' registered to router", connection_id);
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(connection_id).is_some() {
            tracing::debug!("Connection '{}' unregistered from router", connection_id);
        }
    }

    async fn to_all(&self, event: &SessionEvent) {
        let Some(frame) = Self::encode(event) else {
            return;
        };
        let clients = self.clients.lock().await;
        for (connection_id, sender) in clients.iter() {
            Self::push(connection_id, sender, &frame);
        }
    }

    async fn to_all_except(&self, exclude: &ConnectionId, event: &SessionEvent) {
        let Some(frame) = Self::encode(event) else {
            return;
        };
        let clients = self.clients.lock().await;
        for (connection_id, sender) in clients.iter().filter(|(id, _)| *id != exclude) {
            Self::push(connection_id, sender, &frame);
        }
    }

    async fn to_one(&self, target: &ConnectionId, event: &SessionEvent) {
        let Some(frame) = Self::encode(event) else {
            return;
        };
        let clients = self.clients.lock().await;
        match clients.get(target) {
            Some(sender) => Self::push(target, sender, &frame),
            None => tracing::warn!("Connection '{}' not found, dropping frame", target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - WebSocketBroadcastRouter の配信ポリシー（to_all / to_all_except / to_one）
    // - 切断済み・未登録の接続があっても他の受信者に届くこと
    //
    // 【なぜこのテストが必要か】
    // - Router は UseCase から呼ばれる通信層の中核
    // - 誰に何が届くかはセッション同期の正しさそのもの
    // ========================================

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn create_test_router() -> WebSocketBroadcastRouter {
        WebSocketBroadcastRouter::new(Arc::new(Mutex::new(HashMap::new())))
    }

    async fn register(
        router: &WebSocketBroadcastRouter,
        id: &str,
    ) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        router.register_client(conn(id), tx).await;
        rx
    }

    const USER_COUNT_FRAME: &str = r#"{"type":"user-count","n":2}"#;

    #[tokio::test]
    async fn test_to_all_reaches_everyone() {
        // テスト項目: to_all は送信者を含む全員に同じフレームを届ける
        // given (前提条件):
        let router = create_test_router();
        let mut rx_a = register(&router, "a").await;
        let mut rx_b = register(&router, "b").await;

        // when (操作):
        router.to_all(&SessionEvent::UserCount(2)).await;

        // then (期待する結果):
        assert_eq!(rx_a.recv().await, Some(USER_COUNT_FRAME.to_string()));
        assert_eq!(rx_b.recv().await, Some(USER_COUNT_FRAME.to_string()));
    }

    #[tokio::test]
    async fn test_to_all_except_skips_excluded() {
        // テスト項目: to_all_except は除外した接続には届けない
        // given (前提条件):
        let router = create_test_router();
        let mut rx_a = register(&router, "a").await;
        let mut rx_b = register(&router, "b").await;

        // when (操作):
        router
            .to_all_except(&conn("a"), &SessionEvent::UserCount(2))
            .await;

        // then (期待する結果):
        assert_eq!(rx_b.recv().await, Some(USER_COUNT_FRAME.to_string()));
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_to_one_reaches_only_target() {
        // テスト項目: to_one は対象の接続だけに届ける
        // given (前提条件):
        let router = create_test_router();
        let mut rx_a = register(&router, "a").await;
        let mut rx_b = register(&router, "b").await;

        // when (操作):
        router.to_one(&conn("b"), &SessionEvent::UserCount(2)).await;

        // then (期待する結果):
        assert_eq!(rx_b.recv().await, Some(USER_COUNT_FRAME.to_string()));
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_to_one_unknown_target_is_noop() {
        // テスト項目: 未登録の接続への to_one はパニックせず何も送らない
        // given (前提条件):
        let router = create_test_router();
        let mut rx_a = register(&router, "a").await;

        // when (操作):
        router
            .to_one(&conn("ghost"), &SessionEvent::UserCount(2))
            .await;

        // then (期待する結果):
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_channel_does_not_block_others() {
        // テスト項目: 受信側が閉じた接続があっても他の接続には届く
        // given (前提条件):
        let router = create_test_router();
        let rx_dead = register(&router, "dead").await;
        drop(rx_dead);
        let mut rx_alive = register(&router, "alive").await;

        // when (操作):
        router.to_all(&SessionEvent::UserCount(2)).await;

        // then (期待する結果):
        assert_eq!(rx_alive.recv().await, Some(USER_COUNT_FRAME.to_string()));
    }

    #[tokio::test]
    async fn test_unregister_stops_delivery() {
        // テスト項目: 登録解除した接続には配信されない
        // given (前提条件):
        let router = create_test_router();
        let mut rx_a = register(&router, "a").await;

        // when (操作):
        router.unregister_client(&conn("a")).await;
        router.to_all(&SessionEvent::UserCount(2)).await;

        // then (期待する結果): sender が drop されているのでチャンネルは閉じている
        assert_eq!(router.client_count().await, 0);
        assert_eq!(rx_a.recv().await, None);
    }
}
