//! PollEngine: 単一スロットの投票ライフサイクル
//!
//! NoPoll → Active → Ended → NoPoll
//!
//! - 同時に存在できる投票は 1 つだけ
//! - Active 中の start は前の投票と票を黙って置き換える
//! - 票は接続ごとに 1 つ（後勝ち）で、投票開始・終了時にクリアされる

use super::{
    entity::{Poll, Vote},
    error::PollError,
    event::{Delivery, SessionEvent},
    factory::PollIdFactory,
    value_object::{ConnectionId, PollId, PollOption, Timestamp, Username},
};

/// 投票エンジン
#[derive(Debug, Default)]
pub struct PollEngine {
    active: Option<Poll>,
    /// 投票順を保持する。同じ接続の再投票は元の位置で上書き。
    votes: Vec<(ConnectionId, Vote)>,
    ids: PollIdFactory,
}

impl PollEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在アクティブな投票
    pub fn active(&self) -> Option<&Poll> {
        self.active.as_ref()
    }

    /// 現在の票数
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    /// 現在の集計（投票順）
    pub fn tally(&self) -> Vec<Vote> {
        self.votes.iter().map(|(_, vote)| vote.clone()).collect()
    }

    /// 新しい投票を開始し、投票内容を全員へ
    pub fn start(&mut self, options: Vec<PollOption>, now: Timestamp) -> Vec<Delivery> {
        let poll = Poll {
            id: self.ids.next_id(),
            options,
            start_time: now,
        };
        if let Some(previous) = self.active.replace(poll.clone()) {
            tracing::info!(
                "Poll {} replaced by poll {} ({} votes discarded)",
                previous.id,
                poll.id,
                self.votes.len()
            );
        }
        self.votes.clear();

        vec![Delivery::to_all(SessionEvent::PollStarted(poll))]
    }

    /// 投票する
    ///
    /// # Errors
    ///
    /// - `PollError::NoActivePoll`: 投票が存在しない
    /// - `PollError::StalePoll`: `poll_id` がアクティブな投票と一致しない
    ///
    /// いずれの場合も票の状態は変わらず、何も配信されない。
    pub fn vote(
        &mut self,
        connection_id: ConnectionId,
        poll_id: PollId,
        option: PollOption,
        username: Username,
    ) -> Result<Vec<Delivery>, PollError> {
        let poll = self.active.as_ref().ok_or(PollError::NoActivePoll)?;
        if poll.id != poll_id {
            return Err(PollError::StalePoll {
                requested: poll_id,
                active: poll.id,
            });
        }
        if !poll.offers(&option) {
            // 一覧にない選択肢も票として受け付ける
            tracing::debug!(
                "Vote for '{}' is not one of the listed options of poll {}",
                option.as_str(),
                poll.id
            );
        }

        let vote = Vote {
            username: username.clone(),
            option: option.clone(),
        };
        match self.votes.iter_mut().find(|(id, _)| *id == connection_id) {
            Some((_, existing)) => *existing = vote,
            None => self.votes.push((connection_id, vote)),
        }

        Ok(vec![Delivery::to_all(SessionEvent::PollVote {
            user: username,
            option,
        })])
    }

    /// 投票を終了し、集計を全員へ
    ///
    /// アクティブな投票がない場合は何もしない。
    pub fn end(&mut self) -> Vec<Delivery> {
        let Some(poll) = self.active.take() else {
            return Vec::new();
        };
        let results = self.tally();
        self.votes.clear();
        tracing::debug!("Poll {} ended with {} votes", poll.id, results.len());

        vec![Delivery::to_all(SessionEvent::PollEnded { results })]
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

    fn opt(option: &str) -> PollOption {
        PollOption::new(option.to_string()).unwrap()
    }

    fn started() -> (PollEngine, PollId) {
        let mut engine = PollEngine::new();
        engine.start(vec![opt("yes"), opt("no")], Timestamp::new(1000));
        let id = engine.active().unwrap().id;
        (engine, id)
    }

    #[test]
    fn test_start_broadcasts_descriptor() {
        // テスト項目: 投票開始で投票内容が全員に配信される
        // given (前提条件):
        let mut engine = PollEngine::new();

        // when (操作):
        let deliveries = engine.start(vec![opt("yes"), opt("no")], Timestamp::new(1000));

        // then (期待する結果):
        let poll = engine.active().unwrap().clone();
        assert_eq!(poll.options, vec![opt("yes"), opt("no")]);
        assert_eq!(poll.start_time, Timestamp::new(1000));
        assert_eq!(
            deliveries,
            vec![Delivery::to_all(SessionEvent::PollStarted(poll))]
        );
    }

    #[test]
    fn test_start_while_active_replaces_poll_and_votes() {
        // テスト項目: Active 中の start は前の投票と票を置き換え、新しい ID を発行する
        // given (前提条件):
        let (mut engine, first_id) = started();
        engine
            .vote(conn("c1"), first_id, opt("yes"), name("A"))
            .unwrap();

        // when (操作):
        engine.start(vec![opt("red"), opt("blue")], Timestamp::new(2000));

        // then (期待する結果):
        let second_id = engine.active().unwrap().id;
        assert!(second_id > first_id);
        assert_eq!(engine.vote_count(), 0);
    }

    #[test]
    fn test_vote_broadcasts_individual_vote() {
        // テスト項目: 有効な票は記録され、全員に配信される
        // given (前提条件):
        let (mut engine, id) = started();

        // when (操作):
        let deliveries = engine
            .vote(conn("c1"), id, opt("yes"), name("A"))
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            deliveries,
            vec![Delivery::to_all(SessionEvent::PollVote {
                user: name("A"),
                option: opt("yes"),
            })]
        );
        assert_eq!(engine.vote_count(), 1);
    }

    #[test]
    fn test_revote_keeps_only_last_vote() {
        // テスト項目: 同じ接続からの複数票は最後の票だけが集計に残る
        // given (前提条件):
        let (mut engine, id) = started();

        // when (操作):
        engine.vote(conn("c1"), id, opt("yes"), name("A")).unwrap();
        engine.vote(conn("c2"), id, opt("no"), name("B")).unwrap();
        engine.vote(conn("c1"), id, opt("no"), name("A")).unwrap();
        let deliveries = engine.end();

        // then (期待する結果): 集計は最初の投票順を保持する
        assert_eq!(
            deliveries,
            vec![Delivery::to_all(SessionEvent::PollEnded {
                results: vec![
                    Vote {
                        username: name("A"),
                        option: opt("no"),
                    },
                    Vote {
                        username: name("B"),
                        option: opt("no"),
                    },
                ]
            })]
        );
    }

    #[test]
    fn test_vote_for_stale_poll_is_rejected() {
        // テスト項目: アクティブでない poll_id への票は拒否され、状態は変わらない
        // given (前提条件):
        let (mut engine, id) = started();
        engine.vote(conn("c1"), id, opt("yes"), name("A")).unwrap();

        // when (操作):
        let stale = PollId::new(id.value() + 100);
        let result = engine.vote(conn("c2"), stale, opt("no"), name("B"));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(PollError::StalePoll {
                requested: stale,
                active: id
            })
        );
        assert_eq!(engine.tally().len(), 1);
    }

    #[test]
    fn test_vote_without_poll_is_rejected() {
        // テスト項目: 投票が存在しない場合の票は拒否される
        // given (前提条件):
        let mut engine = PollEngine::new();

        // when (操作):
        let result = engine.vote(conn("c1"), PollId::new(1), opt("yes"), name("A"));

        // then (期待する結果):
        assert_eq!(result, Err(PollError::NoActivePoll));
    }

    #[test]
    fn test_vote_for_unlisted_option_is_accepted() {
        // テスト項目: Active で poll_id が一致すれば、一覧にない選択肢の票も記録・配信される
        // given (前提条件):
        let (mut engine, id) = started();

        // when (操作):
        let result = engine.vote(conn("c1"), id, opt("maybe"), name("A"));

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(vec![Delivery::to_all(SessionEvent::PollVote {
                user: name("A"),
                option: opt("maybe"),
            })])
        );
        assert_eq!(
            engine.tally(),
            vec![Vote {
                username: name("A"),
                option: opt("maybe"),
            }]
        );
    }

    #[test]
    fn test_end_clears_poll_and_rejects_late_votes() {
        // テスト項目: 終了後は投票がクリアされ、同じ poll_id への票は拒否される
        // given (前提条件):
        let (mut engine, id) = started();

        // when (操作):
        engine.end();
        let result = engine.vote(conn("c1"), id, opt("yes"), name("A"));

        // then (期待する結果):
        assert!(engine.active().is_none());
        assert_eq!(result, Err(PollError::NoActivePoll));
    }

    #[test]
    fn test_end_without_poll_is_noop() {
        // テスト項目: 投票がない状態での end は何も配信しない
        // given (前提条件):
        let mut engine = PollEngine::new();

        // when (操作):
        let deliveries = engine.end();

        // then (期待する結果):
        assert!(deliveries.is_empty());
    }
}
