//! SessionRegistry: 接続中の参加者と表示名の管理
//!
//! 参加者は join で作成され、切断時にのみ削除されます。
//! 他のコンポーネントは `ConnectionId` で参加者を参照し、
//! 見つからない場合は表示名 "Someone" にフォールバックします。

use std::collections::HashMap;

use super::{
    entity::Participant,
    event::{Delivery, SessionEvent},
    value_object::{ConnectionId, Timestamp, Username},
};

/// 参加者レジストリ
#[derive(Debug, Default)]
pub struct SessionRegistry {
    participants: HashMap<ConnectionId, Participant>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 参加者を登録し、参加アナウンスを返す
    ///
    /// 同じ接続からの重複 join はエラーにせず上書きする。
    /// 参加者数の更新は `count_update()` で別途生成する（リプレイを間に挟むため）。
    pub fn join(
        &mut self,
        connection_id: ConnectionId,
        username: Username,
        now: Timestamp,
    ) -> Delivery {
        let message = format!("{} joined the virtual date! 💕", username);
        let previous = self.participants.insert(
            connection_id.clone(),
            Participant::new(connection_id, username),
        );
        if let Some(previous) = previous {
            tracing::debug!(
                "Connection '{}' joined again, replacing '{}'",
                previous.connection_id,
                previous.username
            );
        }

        Delivery::to_all(SessionEvent::SystemMessage {
            message,
            timestamp: now,
        })
    }

    /// 参加者を削除し、退出アナウンスと参加者数の更新を返す
    ///
    /// 登録されていない接続の場合は何もしない（空のリストを返す）。
    pub fn leave(&mut self, connection_id: &ConnectionId, now: Timestamp) -> Vec<Delivery> {
        let Some(participant) = self.participants.remove(connection_id) else {
            return Vec::new();
        };

        vec![
            Delivery::to_all(SessionEvent::SystemMessage {
                message: format!("{} left the date 😢", participant.username),
                timestamp: now,
            }),
            self.count_update(),
        ]
    }

    /// 参加者を検索（失敗しない）
    pub fn lookup(&self, connection_id: &ConnectionId) -> Option<&Participant> {
        self.participants.get(connection_id)
    }

    /// 表示名を取得（未登録の場合は "Someone"）
    pub fn display_name(&self, connection_id: &ConnectionId) -> Username {
        self.lookup(connection_id)
            .map(|p| p.username.clone())
            .unwrap_or_else(Username::fallback)
    }

    /// 現在の参加者数
    pub fn count(&self) -> usize {
        self.participants.len()
    }

    /// 全員への参加者数の通知
    pub fn count_update(&self) -> Delivery {
        Delivery::to_all(SessionEvent::UserCount(self.count()))
    }

    /// 参加者リスト（ConnectionId でソート済み）
    pub fn participants(&self) -> Vec<Participant> {
        let mut participants: Vec<Participant> = self.participants.values().cloned().collect();
        participants.sort_by(|a, b| a.connection_id.as_str().cmp(b.connection_id.as_str()));
        participants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn name(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    #[test]
    fn test_join_registers_and_announces() {
        // テスト項目: join で参加者が登録され、全員への参加アナウンスが返される
        // given (前提条件):
        let mut registry = SessionRegistry::new();

        // when (操作):
        let delivery = registry.join(conn("c1"), name("A"), Timestamp::new(1000));

        // then (期待する結果):
        assert_eq!(registry.count(), 1);
        assert_eq!(
            delivery,
            Delivery::to_all(SessionEvent::SystemMessage {
                message: "A joined the virtual date! 💕".to_string(),
                timestamp: Timestamp::new(1000),
            })
        );
        assert_eq!(
            registry.count_update(),
            Delivery::to_all(SessionEvent::UserCount(1))
        );
    }

    #[test]
    fn test_duplicate_join_overwrites() {
        // テスト項目: 同じ接続からの重複 join は上書きされ、参加者数は増えない
        // given (前提条件):
        let mut registry = SessionRegistry::new();
        registry.join(conn("c1"), name("A"), Timestamp::new(1000));

        // when (操作):
        registry.join(conn("c1"), name("A2"), Timestamp::new(2000));

        // then (期待する結果):
        assert_eq!(registry.count(), 1);
        assert_eq!(registry.display_name(&conn("c1")), name("A2"));
    }

    #[test]
    fn test_leave_announces_then_updates_count() {
        // テスト項目: 登録済みの参加者の leave で退出アナウンスと参加者数が返される
        // given (前提条件):
        let mut registry = SessionRegistry::new();
        registry.join(conn("c1"), name("A"), Timestamp::new(1000));
        registry.join(conn("c2"), name("B"), Timestamp::new(1000));

        // when (操作):
        let deliveries = registry.leave(&conn("c1"), Timestamp::new(3000));

        // then (期待する結果):
        assert_eq!(
            deliveries,
            vec![
                Delivery::to_all(SessionEvent::SystemMessage {
                    message: "A left the date 😢".to_string(),
                    timestamp: Timestamp::new(3000),
                }),
                Delivery::to_all(SessionEvent::UserCount(1)),
            ]
        );
        assert!(registry.lookup(&conn("c1")).is_none());
    }

    #[test]
    fn test_leave_unknown_connection_is_noop() {
        // テスト項目: 未登録の接続の leave は何も返さない
        // given (前提条件):
        let mut registry = SessionRegistry::new();
        registry.join(conn("c1"), name("A"), Timestamp::new(1000));

        // when (操作):
        let deliveries = registry.leave(&conn("ghost"), Timestamp::new(2000));

        // then (期待する結果):
        assert!(deliveries.is_empty());
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_display_name_falls_back_to_someone() {
        // テスト項目: 未登録の接続の表示名は "Someone" になる
        // given (前提条件):
        let registry = SessionRegistry::new();

        // when (操作):
        let display_name = registry.display_name(&conn("ghost"));

        // then (期待する結果):
        assert_eq!(display_name.as_str(), "Someone");
    }

    #[test]
    fn test_participants_sorted_by_connection_id() {
        // テスト項目: 参加者リストは ConnectionId でソートされる
        // given (前提条件):
        let mut registry = SessionRegistry::new();
        registry.join(conn("c3"), name("C"), Timestamp::new(0));
        registry.join(conn("c1"), name("A"), Timestamp::new(0));
        registry.join(conn("c2"), name("B"), Timestamp::new(0));

        // when (操作):
        let participants = registry.participants();

        // then (期待する結果):
        let ids: Vec<&str> = participants
            .iter()
            .map(|p| p.connection_id.as_str())
            .collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
    }
}
