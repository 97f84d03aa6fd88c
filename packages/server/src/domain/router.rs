//! BroadcastRouter trait 定義
//!
//! ドメイン層が必要とするファンアウト（配信）のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 配信ポリシー
//!
//! - `to_all`: 送信者を含む全ての接続
//! - `to_all_except`: 送信者以外の全ての接続
//! - `to_one`: 特定の接続のみ（参加時のリプレイ）
//!
//! 配信は fire-and-forget です。Router は到達確認もリトライも行わず、
//! 遅い受信者や切断済みの受信者が他の受信者への配信を妨げてはいけません。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    event::{Delivery, Recipients, SessionEvent},
    value_object::ConnectionId,
};

/// 接続ごとの送信チャンネル（シリアライズ済みフレームを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Broadcast Router trait
///
/// UseCase 層はこの trait に依存し、WebSocket などの具体的な実装には依存しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BroadcastRouter: Send + Sync {
    /// 接続を配信対象として登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続を配信対象から削除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 全ての接続に配信
    async fn to_all(&self, event: &SessionEvent);

    /// `exclude` 以外の全ての接続に配信
    async fn to_all_except(&self, exclude: &ConnectionId, event: &SessionEvent);

    /// `target` のみに配信
    async fn to_one(&self, target: &ConnectionId, event: &SessionEvent);
}

/// Delivery のリストを順番通りに Router へ渡す
pub async fn deliver(router: &dyn BroadcastRouter, deliveries: Vec<Delivery>) {
    for delivery in deliveries {
        match &delivery.recipients {
            Recipients::All => router.to_all(&delivery.event).await,
            Recipients::AllExcept(exclude) => {
                router.to_all_except(exclude, &delivery.event).await
            }
            Recipients::Only(target) => router.to_one(target, &delivery.event).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_deliver_routes_each_recipient_kind() {
        // テスト項目: Recipients の種類に応じて Router のメソッドが呼ばれる
        // given (前提条件):
        let mut router = MockBroadcastRouter::new();
        router
            .expect_to_all()
            .withf(|event| *event == SessionEvent::UserCount(2))
            .times(1)
            .return_const(());
        router
            .expect_to_all_except()
            .with(eq(conn("alice")), eq(SessionEvent::UserCount(3)))
            .times(1)
            .return_const(());
        router
            .expect_to_one()
            .with(eq(conn("bob")), eq(SessionEvent::UserCount(4)))
            .times(1)
            .return_const(());

        // when (操作):
        deliver(
            &router,
            vec![
                Delivery::to_all(SessionEvent::UserCount(2)),
                Delivery::to_all_except(conn("alice"), SessionEvent::UserCount(3)),
                Delivery::to_one(conn("bob"), SessionEvent::UserCount(4)),
            ],
        )
        .await;

        // then (期待する結果): times(1) の検証は drop 時に行われる
    }

    #[tokio::test]
    async fn test_deliver_empty_list_calls_nothing() {
        // テスト項目: 空の Delivery リストでは Router が一切呼ばれない
        // given (前提条件): 期待値を設定しない Mock（呼ばれたら panic）
        let router = MockBroadcastRouter::new();

        // when (操作):
        deliver(&router, Vec::new()).await;
    }
}
