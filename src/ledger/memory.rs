//! In-process ledger for native runs and tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{LeaderboardEntry, Ledger, LedgerError, Receipt};

/// Rows kept in the published table
pub const TABLE_SIZE: usize = 10;

/// Ledger held in memory.
///
/// Mirrors the service's two-step flow: submissions land in the player's
/// record, and only a refresh republishes the table that `top_entries` reads.
#[derive(Debug)]
pub struct MemoryLedger {
    chain_id: String,
    player: RefCell<Option<String>>,
    bests: RefCell<HashMap<String, (u64, u64)>>,
    published: RefCell<Vec<LeaderboardEntry>>,
    offline: Cell<bool>,
    clock: Cell<u64>,
}

impl MemoryLedger {
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            player: RefCell::new(None),
            bests: RefCell::new(HashMap::new()),
            published: RefCell::new(Vec::new()),
            offline: Cell::new(false),
            clock: Cell::new(0),
        }
    }

    /// Seed another player's record, as if submitted from their chain
    pub fn insert_record(&self, player_name: &str, score: u64) {
        let ts = self.next_timestamp();
        self.bests
            .borrow_mut()
            .insert(player_name.to_string(), (score, ts));
    }

    /// Make every call fail with a transport error
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn best_for(&self, player_name: &str) -> Option<u64> {
        self.bests.borrow().get(player_name).map(|(s, _)| *s)
    }

    fn next_timestamp(&self) -> u64 {
        let ts = self.clock.get() + 1;
        self.clock.set(ts);
        ts
    }

    fn check_online(&self) -> Result<(), LedgerError> {
        if self.offline.get() {
            Err(LedgerError::Transport("ledger offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new("local")
    }
}

impl Ledger for MemoryLedger {
    async fn setup_player(&self, player_name: &str) -> Result<Receipt, LedgerError> {
        self.check_online()?;
        *self.player.borrow_mut() = Some(player_name.to_string());
        Ok(Receipt(serde_json::json!({ "setupGame": true })))
    }

    async fn submit_score(&self, score: u64) -> Result<Receipt, LedgerError> {
        self.check_online()?;
        let player = self
            .player
            .borrow()
            .clone()
            .ok_or(LedgerError::NotInitialized)?;

        let ts = self.next_timestamp();
        let mut bests = self.bests.borrow_mut();
        let record = bests.entry(player).or_insert((0, ts));
        // The chain keeps the maximum
        if score > record.0 {
            *record = (score, ts);
        }
        Ok(Receipt(serde_json::json!({ "setBestAndSubmit": score })))
    }

    async fn request_leaderboard_refresh(&self) -> Result<(), LedgerError> {
        self.check_online()?;
        let mut table: Vec<LeaderboardEntry> = self
            .bests
            .borrow()
            .iter()
            .map(|(name, (score, ts))| LeaderboardEntry {
                player_name: name.clone(),
                score: *score,
                chain_id: self.chain_id.clone(),
                timestamp: *ts,
            })
            .collect();
        // Highest first, earlier submission wins ties
        table.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.timestamp.cmp(&b.timestamp))
        });
        table.truncate(TABLE_SIZE);
        *self.published.borrow_mut() = table;
        Ok(())
    }

    async fn top_entries(&self) -> Result<Vec<LeaderboardEntry>, LedgerError> {
        self.check_online()?;
        Ok(self.published.borrow().clone())
    }

    async fn player_best(&self) -> Result<u64, LedgerError> {
        self.check_online()?;
        let player = self.player.borrow();
        Ok(player
            .as_deref()
            .and_then(|name| self.best_for(name))
            .unwrap_or(0))
    }
}
