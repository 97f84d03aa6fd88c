//! Domain factories for creating identifiers.

use super::{ConnectionId, PollId, error::ValueObjectError};

/// Factory for generating ConnectionId instances.
///
/// Connection ids are random UUID v4 strings assigned by the server when a
/// transport connection opens.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    ///
    /// # Errors
    ///
    /// This method should not fail in practice, but returns Result for consistency
    /// with the domain error handling pattern.
    pub fn generate() -> Result<ConnectionId, ValueObjectError> {
        ConnectionId::new(uuid::Uuid::new_v4().to_string())
    }
}

/// Factory for poll ids.
///
/// Ids are issued from a counter owned by the session, so they are strictly
/// increasing and never repeat for the lifetime of that session.
#[derive(Debug)]
pub struct PollIdFactory {
    next: u64,
}

impl PollIdFactory {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Issue the next poll id
    pub fn next_id(&mut self) -> PollId {
        let id = PollId::new(self.next);
        self.next += 1;
        id
    }
}

impl Default for PollIdFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_factory_generate() {
        // テスト項目: ConnectionIdFactory::generate() で UUID v4 形式の ConnectionId を生成できる
        // when (操作):
        let connection_id = ConnectionIdFactory::generate().unwrap();

        // then (期待する結果):
        assert_eq!(connection_id.as_str().len(), 36); // UUID v4 の標準長（ハイフン含む）
    }

    #[test]
    fn test_connection_id_factory_generate_uniqueness() {
        // テスト項目: ConnectionIdFactory::generate() は毎回異なる ID を生成する
        // when (操作):
        let id1 = ConnectionIdFactory::generate().unwrap();
        let id2 = ConnectionIdFactory::generate().unwrap();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_poll_id_factory_is_strictly_increasing() {
        // テスト項目: PollIdFactory は重複しない単調増加の ID を発行する
        // given (前提条件):
        let mut factory = PollIdFactory::new();

        // when (操作):
        let ids: Vec<PollId> = (0..5).map(|_| factory.next_id()).collect();

        // then (期待する結果):
        assert_eq!(ids[0], PollId::new(1));
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
