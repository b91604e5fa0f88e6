//! Hand-off from game-over to the ledger
//!
//! Called off the frame loop. Failures end here: they are logged and the
//! caller simply gets nothing to apply.

use std::cell::Cell;

use super::{LeaderboardSnapshot, Ledger, LedgerError};
use crate::identity::PlayerIdentity;

pub struct LedgerBridge<L, I> {
    ledger: L,
    identity: I,
    /// Player chain registered with the leaderboard this page load
    configured: Cell<bool>,
    /// A hand-off is talking to the ledger
    busy: Cell<bool>,
    /// Best that arrived while busy; the running hand-off submits it
    queued: Cell<Option<u64>>,
}

/// Clears the busy flag however the hand-off ends
struct BusyGuard<'a>(&'a Cell<bool>);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<L: Ledger, I: PlayerIdentity> LedgerBridge<L, I> {
    pub fn new(ledger: L, identity: I) -> Self {
        Self {
            ledger,
            identity,
            configured: Cell::new(false),
            busy: Cell::new(false),
            queued: Cell::new(None),
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Submit a new best, then read back the table.
    ///
    /// Returns `None` when there is nothing to apply: no signed-in player,
    /// any ledger failure, or another hand-off already in flight. In the
    /// last case the score is queued and the running hand-off submits it
    /// before reading the table.
    pub async fn on_high_score(&self, score: u64) -> Option<LeaderboardSnapshot> {
        let player = self.identity.current_player_name();
        if player.is_empty() {
            log::info!("No player name set, skipping score submission");
            return None;
        }

        if self.busy.get() {
            let best = self.queued.get().map_or(score, |q| q.max(score));
            self.queued.set(Some(best));
            log::debug!("Submission in flight, queued best {}", best);
            return None;
        }
        self.busy.set(true);
        let _busy = BusyGuard(&self.busy);

        match self.submit_and_fetch(&player, score).await {
            Ok(snapshot) => {
                log::info!(
                    "Score {} submitted for '{}', rank {:?}, best {}",
                    score,
                    player,
                    snapshot.rank,
                    snapshot.best
                );
                Some(snapshot)
            }
            Err(e) => {
                if let Some(lost) = self.queued.take() {
                    log::warn!("Dropping queued best {}", lost);
                }
                log::error!("Failed to submit score {}: {}", score, e);
                None
            }
        }
    }

    /// Re-read the table and the player's best without submitting.
    /// Anonymous players still get the table, with no rank.
    pub async fn refresh(&self) -> Option<LeaderboardSnapshot> {
        let player = self.identity.current_player_name();
        match self.fetch(&player).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::error!("Failed to refresh leaderboard: {}", e);
                None
            }
        }
    }

    async fn submit_and_fetch(
        &self,
        player: &str,
        score: u64,
    ) -> Result<LeaderboardSnapshot, LedgerError> {
        if !self.configured.get() {
            self.ledger.setup_player(player).await?;
            self.configured.set(true);
            log::debug!("Ledger configured for '{}'", player);
        }

        let mut best = score;
        loop {
            self.ledger.submit_score(best).await?;
            match self.queued.take() {
                Some(next) if next > best => best = next,
                _ => break,
            }
        }
        self.fetch(player).await
    }

    async fn fetch(&self, player: &str) -> Result<LeaderboardSnapshot, LedgerError> {
        self.ledger.request_leaderboard_refresh().await?;
        let entries = self.ledger.top_entries().await?;
        let chain_best = self.ledger.player_best().await?;
        Ok(LeaderboardSnapshot::new(entries, player, chain_best))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::FixedIdentity;
    use crate::ledger::{LeaderboardEntry, MemoryLedger, Receipt};
    use pollster::block_on;
    use std::future::Future;
    use std::pin::{Pin, pin};
    use std::task::{Context, Poll, Waker};

    fn bridge(name: &str) -> LedgerBridge<MemoryLedger, FixedIdentity> {
        LedgerBridge::new(MemoryLedger::default(), FixedIdentity::new(name))
    }

    fn rank(snapshot: Option<LeaderboardSnapshot>) -> Option<u32> {
        snapshot.and_then(|s| s.rank)
    }

    #[test]
    fn test_high_score_submits_and_ranks() {
        let bridge = bridge("ada");
        bridge.ledger().insert_record("bob", 40);
        bridge.ledger().insert_record("cy", 10);

        let snapshot = block_on(bridge.on_high_score(15)).expect("snapshot");
        assert_eq!(snapshot.rank, Some(2));
        assert_eq!(snapshot.best, 15);
        let names: Vec<_> = snapshot.entries.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec!["bob", "ada", "cy"]);
        assert_eq!(bridge.ledger().best_for("ada"), Some(15));
    }

    #[test]
    fn test_anonymous_player_skips_submission() {
        let bridge = bridge("");
        assert_eq!(block_on(bridge.on_high_score(15)), None);
        assert_eq!(bridge.ledger().best_for(""), None);
    }

    #[test]
    fn test_failure_gives_nothing_to_apply() {
        let bridge = bridge("ada");
        bridge.ledger().set_offline(true);
        assert_eq!(block_on(bridge.on_high_score(15)), None);

        // Setup never succeeded, so the next attempt configures again
        bridge.ledger().set_offline(false);
        assert_eq!(rank(block_on(bridge.on_high_score(16))), Some(1));
    }

    #[test]
    fn test_refresh_reads_table_and_best() {
        let bridge = bridge("ada");
        bridge.ledger().insert_record("ada", 9);
        bridge.ledger().insert_record("bob", 11);

        let snapshot = block_on(bridge.refresh()).expect("snapshot");
        assert_eq!(snapshot.rank, Some(2));
        assert_eq!(snapshot.best, 9);
        assert_eq!(snapshot.entries.len(), 2);
    }

    #[test]
    fn test_refresh_returns_ledger_best_after_submission() {
        let bridge = bridge("ada");
        block_on(bridge.on_high_score(23));
        let snapshot = block_on(bridge.refresh()).expect("snapshot");
        assert_eq!(snapshot.best, 23);
    }

    #[test]
    fn test_anonymous_refresh_still_reads_table() {
        let bridge = bridge("");
        bridge.ledger().insert_record("bob", 11);
        let snapshot = block_on(bridge.refresh()).expect("snapshot");
        assert_eq!(snapshot.rank, None);
        assert_eq!(snapshot.entries.len(), 1);
    }

    #[test]
    fn test_player_missing_from_table() {
        let bridge = bridge("ada");
        for i in 0..10 {
            bridge.ledger().insert_record(&format!("p{i}"), 100 + i);
        }
        let snapshot = block_on(bridge.on_high_score(1)).expect("snapshot");
        assert_eq!(snapshot.rank, None);
        assert_eq!(snapshot.best, 1);
        assert_eq!(snapshot.entries.len(), 10);
    }

    /// Pending once, then ready
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    /// Memory ledger whose setup takes a round trip
    #[derive(Default)]
    struct SlowSetup {
        inner: MemoryLedger,
        setups: Cell<u32>,
    }

    impl Ledger for SlowSetup {
        async fn setup_player(&self, player_name: &str) -> Result<Receipt, LedgerError> {
            self.setups.set(self.setups.get() + 1);
            YieldOnce(false).await;
            self.inner.setup_player(player_name).await
        }

        async fn submit_score(&self, score: u64) -> Result<Receipt, LedgerError> {
            self.inner.submit_score(score).await
        }

        async fn request_leaderboard_refresh(&self) -> Result<(), LedgerError> {
            self.inner.request_leaderboard_refresh().await
        }

        async fn top_entries(&self) -> Result<Vec<LeaderboardEntry>, LedgerError> {
            self.inner.top_entries().await
        }

        async fn player_best(&self) -> Result<u64, LedgerError> {
            self.inner.player_best().await
        }
    }

    #[test]
    fn test_overlapping_hand_offs_set_up_once() {
        let bridge = LedgerBridge::new(SlowSetup::default(), FixedIdentity::new("ada"));
        let mut cx = Context::from_waker(Waker::noop());

        let mut first = pin!(bridge.on_high_score(5));
        assert!(first.as_mut().poll(&mut cx).is_pending());

        // Second game-over while the first is still registering
        let mut second = pin!(bridge.on_high_score(8));
        assert_eq!(second.as_mut().poll(&mut cx), Poll::Ready(None));

        let Poll::Ready(Some(snapshot)) = first.as_mut().poll(&mut cx) else {
            panic!("first hand-off should finish");
        };
        assert_eq!(bridge.ledger().setups.get(), 1);
        assert_eq!(snapshot.best, 8);
        assert_eq!(bridge.ledger().inner.best_for("ada"), Some(8));

        // Idle again: the next hand-off runs on its own
        assert_eq!(rank(block_on(bridge.on_high_score(9))), Some(1));
        assert_eq!(bridge.ledger().setups.get(), 1);
    }
}
