//! UseCase: セッション状態の取得（読み取り専用）

use crate::domain::{Participant, PlaybackSnapshot, Poll, Timestamp};

use super::SharedSession;

/// ある時点のセッション状態のコピー
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// 参加者（接続 ID 順）
    pub participants: Vec<Participant>,
    pub playback: PlaybackSnapshot,
    pub chat_history_size: usize,
    /// アクティブな投票と現在の票数
    pub active_poll: Option<(Poll, usize)>,
    pub created_at: Timestamp,
}

/// セッション状態取得のユースケース
pub struct GetSessionStateUseCase {
    session: SharedSession,
}

impl GetSessionStateUseCase {
    pub fn new(session: SharedSession) -> Self {
        Self { session }
    }

    pub async fn execute(&self) -> SessionState {
        let session = self.session.lock().await;
        SessionState {
            participants: session.registry().participants(),
            playback: session.playback().snapshot().clone(),
            chat_history_size: session.chat_log().len(),
            active_poll: session
                .polls()
                .active()
                .map(|poll| (poll.clone(), session.polls().vote_count())),
            created_at: session.created_at(),
        }
    }
}
