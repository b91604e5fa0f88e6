//! Running score, personal best and leaderboard rank
//!
//! The UI reads these through accessors only. Best comes from the ledger or
//! the local high score table and never goes down; rank is whatever the
//! ledger last reported and may be stale.

/// Score bookkeeping for one browser profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u64,
    best: u64,
    rank: Option<u32>,
}

impl ScoreTracker {
    pub fn new(best: u64) -> Self {
        Self {
            score: 0,
            best,
            rank: None,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// 1-based leaderboard position, if the ledger has reported one
    pub fn rank(&self) -> Option<u32> {
        self.rank
    }

    pub fn increment(&mut self, by: u32) {
        self.score += u64::from(by);
    }

    /// Start a new session at zero. Best and rank are kept.
    pub fn reset_session(&mut self) {
        self.score = 0;
    }

    /// Close out the session. Returns the new best if this run beat it.
    pub fn finish_session(&mut self) -> Option<u64> {
        if self.score > self.best {
            self.best = self.score;
            Some(self.best)
        } else {
            None
        }
    }

    /// Raise best from an outside source (ledger or local table)
    pub fn seed_best(&mut self, best: u64) {
        self.best = self.best.max(best);
    }

    pub fn set_rank(&mut self, rank: Option<u32>) {
        self.rank = rank;
    }
}
