//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - Router からの登録解除と、残りの参加者への退出通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：join 済みの接続の切断（アナウンスと参加者数）
//! - エッジケース：join していない接続の切断（何も配信しない）

use std::sync::Arc;

use crate::domain::{BroadcastRouter, ConnectionId, deliver};

use super::SharedSession;

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    session: SharedSession,
    router: Arc<dyn BroadcastRouter>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(session: SharedSession, router: Arc<dyn BroadcastRouter>) -> Self {
        Self { session, router }
    }

    /// 切断を実行
    ///
    /// 先に Router から登録解除するため、退出通知は切断した本人には送られない。
    pub async fn execute(&self, connection_id: ConnectionId) {
        let mut session = self.session.lock().await;
        self.router.unregister_client(&connection_id).await;

        let deliveries = session.leave(&connection_id);
        if deliveries.is_empty() {
            tracing::debug!("'{}' closed without joining", connection_id);
        } else {
            tracing::info!("'{}' left the session", connection_id);
        }
        deliver(&*self.router, deliveries).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            Delivery, SessionEvent, Timestamp, Username, router::MockBroadcastRouter,
        },
        usecase::{
            ConnectParticipantUseCase,
            test_support::{RecordingRouter, TEST_NOW, conn, create_test_session},
        },
    };
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_disconnect_joined_participant() {
        // テスト項目: join 済みの接続の切断で退出アナウンスと参加者数が配信される
        // given (前提条件):
        let session = create_test_session();
        let router = Arc::new(RecordingRouter::default());
        let connect = ConnectParticipantUseCase::new(session.clone(), router.clone());
        let disconnect = DisconnectParticipantUseCase::new(session.clone(), router.clone());
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        connect.execute(conn("a"), tx).await;
        connect
            .join(conn("a"), Username::new("A".to_string()).unwrap())
            .await;
        router.clear().await;

        // when (操作):
        disconnect.execute(conn("a")).await;

        // then (期待する結果):
        assert!(!router.is_registered(&conn("a")).await);
        assert_eq!(session.lock().await.registry().count(), 0);
        assert_eq!(
            router.deliveries().await,
            vec![
                Delivery::to_all(SessionEvent::SystemMessage {
                    message: "A left the date 😢".to_string(),
                    timestamp: Timestamp::new(TEST_NOW),
                }),
                Delivery::to_all(SessionEvent::UserCount(0)),
            ]
        );
    }

    #[tokio::test]
    async fn test_disconnect_unjoined_connection_broadcasts_nothing() {
        // テスト項目: join していない接続の切断は登録解除のみで、何も配信しない
        // given (前提条件): unregister 以外が呼ばれたら panic する Mock
        let session = create_test_session();
        let mut router = MockBroadcastRouter::new();
        router
            .expect_unregister_client()
            .with(eq(conn("ghost")))
            .times(1)
            .return_const(());
        let disconnect = DisconnectParticipantUseCase::new(session.clone(), Arc::new(router));

        // when (操作):
        disconnect.execute(conn("ghost")).await;

        // then (期待する結果):
        assert_eq!(session.lock().await.registry().count(), 0);
    }
}
